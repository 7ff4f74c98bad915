use super::helpers::record::Record;
use anyhow::Result;
use itertools::Itertools;
use rand::seq::SliceRandom;
use std::io::Cursor;
use tightwire_codec::{Deser, Format, Ser, TextEncoding, WireRead, WireReadExt, WireWrite};
use tightwire_geom::{Point2, Point3, Polyline};

pub fn test_sessions(format: &Format) -> Result<()> {
    tri_state_strings(format)?;
    records(format)?;
    object_orderings(format)?;
    Ok(())
}

fn tri_state_strings(format: &Format) -> Result<()> {
    let mut w = format.make_writer(vec![], None);
    let mut w_len = *w.write_string(None)?;
    w_len += *w.write_string(Some(""))?;
    w_len += *w.write_string(Some("hello"))?;
    let buf = w.into_inner()?;

    if format.text_encoding().name() == "utf-8" {
        assert_eq!(buf, [0x01, 0x00, 0x0a, b'h', b'e', b'l', b'l', b'o']);
    }
    assert_eq!(w_len, buf.len());

    let mut r = format.make_reader(Cursor::new(buf), None);
    assert_eq!(r.read_string()?, None);
    assert_eq!(r.read_string()?, Some(String::new()));
    assert_eq!(r.read_string()?.as_deref(), Some("hello"));
    Ok(())
}

fn records(format: &Format) -> Result<()> {
    let mut rng = rand::thread_rng();
    let records = (0..20)
        .map(|_| Record::gen(&mut rng, 40, 30))
        .collect::<Vec<_>>();

    for record in records.iter() {
        let buf = record.ser_solo(format)?;
        assert_eq!(&Record::deser_solo(format, &buf)?, record);
    }

    /* All in one stream, positions line up record by record. */
    let mut w = format.make_writer(vec![], None);
    let mut w_len_at_each = vec![];
    for record in records.iter() {
        record.ser(&mut w)?;
        w_len_at_each.push(w.position());
    }
    let buf = w.into_inner()?;

    let mut r = format.make_reader(Cursor::new(&buf), None);
    for (record, w_len) in records.iter().zip(w_len_at_each) {
        assert_eq!(&Record::deser(&mut r)?, record);
        assert_eq!(r.position(), w_len);
    }
    assert_eq!(r.position(), buf.len());
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum Obj {
    P2,
    P3,
    Line,
    Null,
}

/// Every subset of object kinds, in order and shuffled, split over two streams of one format.
fn object_orderings(format: &Format) -> Result<()> {
    let mut rng = rand::thread_rng();
    let p2 = Point2 { x: 1.0, y: 2.0 };
    let p3 = Point3 {
        x: 1.0,
        y: 2.0,
        z: 3.0,
    };
    let line = Polyline::from(vec![p2, p2]);

    let write = |w: &mut dyn WireWrite, obj: Obj| -> tightwire_codec::Result<()> {
        match obj {
            Obj::P2 => w.write_object(Some(&p2)),
            Obj::P3 => w.write_object(Some(&p3)),
            Obj::Line => w.write_object(Some(&line)),
            Obj::Null => w.write_object(None),
        }?;
        Ok(())
    };
    let verify = |r: &mut dyn WireRead, obj: Obj| -> Result<()> {
        match obj {
            Obj::P2 => assert_eq!(r.read_object_as::<Point2>()?, Some(p2)),
            Obj::P3 => assert_eq!(r.read_object_as::<Point3>()?, Some(p3)),
            Obj::Line => assert_eq!(r.read_object_as::<Polyline>()?.as_ref(), Some(&line)),
            Obj::Null => assert!(r.read_object()?.is_none()),
        }
        Ok(())
    };

    let objs = [Obj::P2, Obj::P3, Obj::Line, Obj::Null];
    for mut objs in objs.into_iter().powerset() {
        objs.shuffle(&mut rng);
        let mid = objs.len() / 2;

        let mut bufs = vec![];
        for half in [&objs[..mid], &objs[mid..]] {
            let mut w = format.make_writer(vec![], None);
            for obj in half {
                write(&mut w, *obj)?;
            }
            bufs.push(w.into_inner()?);
        }

        /* Second stream first. */
        for (half, buf) in [(&objs[mid..], &bufs[1]), (&objs[..mid], &bufs[0])] {
            let mut r = format.make_reader(Cursor::new(buf), None);
            for obj in half {
                verify(&mut r, *obj)?;
            }
            assert_eq!(r.position(), buf.len());
        }
    }
    Ok(())
}
