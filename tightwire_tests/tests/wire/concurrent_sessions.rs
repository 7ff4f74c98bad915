use super::helpers::{gen, record::Record};
use anyhow::Result;
use std::io::Cursor;
use std::sync::Barrier;
use std::thread;
use tightwire_codec::{Deser, Format, Ser, WireReadExt, WireWrite};
use tightwire_geom::{Point2, POINT2_TYPE_NAME, POINT3_TYPE_NAME, POLYLINE_TYPE_NAME};

/// Many sessions of one format, each on its own thread, racing on first sightings of every type.
pub fn test_concurrent_sessions(format: &Format) -> Result<()> {
    let thread_ct = 8;
    let records_per_thread = 10;
    let barrier = &Barrier::new(thread_ct);

    let sessions = thread::scope(|scope| {
        let workers = (0..thread_ct)
            .map(|_| {
                scope.spawn(move || -> Result<(Vec<Record>, Point2, Vec<u8>)> {
                    let mut rng = rand::thread_rng();
                    let records = (0..records_per_thread)
                        .map(|_| Record::gen(&mut rng, 16, 8))
                        .collect::<Vec<_>>();
                    let point = gen::gen_point2(&mut rng);

                    barrier.wait();

                    let mut w = format.make_writer(vec![], None);
                    w.write_object(Some(&point))?;
                    for record in records.iter() {
                        record.ser(&mut w)?;
                    }
                    Ok((records, point, w.into_inner()?))
                })
            })
            .collect::<Vec<_>>();
        workers
            .into_iter()
            .map(|worker| worker.join().expect("worker panicked"))
            .collect::<Result<Vec<_>>>()
    })?;

    let schema = format.schema();
    for name in [POINT2_TYPE_NAME, POINT3_TYPE_NAME, POLYLINE_TYPE_NAME] {
        let handle = schema.handle_of(name);
        if let Some(handle) = handle {
            assert_eq!(schema.resolve(handle)?.as_str(), name);
        }
    }
    assert!(schema.handle_of(POINT2_TYPE_NAME).is_some());
    assert!(schema.handle_of(POLYLINE_TYPE_NAME).is_some());
    assert!(schema.len() <= 3);

    /* Any session's bytes read back through the shared format, on any thread. */
    thread::scope(|scope| {
        let readers = sessions
            .iter()
            .rev()
            .map(|(records, point, buf)| {
                scope.spawn(move || -> Result<()> {
                    let mut r = format.make_reader(Cursor::new(buf), None);
                    assert_eq!(r.read_object_as::<Point2>()?, Some(*point));
                    for record in records.iter() {
                        assert_eq!(&Record::deser(&mut r)?, record);
                    }
                    Ok(())
                })
            })
            .collect::<Vec<_>>();
        readers
            .into_iter()
            .map(|reader| reader.join().expect("reader panicked"))
            .collect::<Result<()>>()
    })?;

    Ok(())
}
