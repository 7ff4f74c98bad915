use super::helpers::record::Record;
use anyhow::Result;
use std::io::Cursor;
use tightwire_codec::{Deser, Format, Ser, WireError};

/// Every strict prefix of a valid encoding fails with [`WireError::TruncatedStream`].
pub fn test_truncation(format: &Format) -> Result<()> {
    let mut rng = rand::thread_rng();

    for _ in 0..5 {
        let record = Record::gen(&mut rng, 8, 4);
        let buf = record.ser_solo(format)?;
        assert_eq!(Record::deser_solo(format, &buf)?, record);

        for cut in 0..buf.len() {
            let res = Record::deser_solo(format, &buf[..cut]);
            assert!(
                matches!(res, Err(WireError::TruncatedStream)),
                "cut {cut} of {}: {:?}",
                buf.len(),
                res
            );
        }
    }

    /* A reader over an exhausted source keeps reporting truncation. */
    let mut r = format.make_reader(Cursor::new(Vec::<u8>::new()), None);
    for _ in 0..2 {
        assert!(matches!(
            <Option<String>>::deser(&mut r),
            Err(WireError::TruncatedStream)
        ));
    }

    Ok(())
}
