use crate::serde::varint;
use crate::{Result, WireError};
use std::io::{Read, Write};

/// Reads exactly `len` bytes.
///
/// The buffer grows with the bytes actually received,
/// so a lying length on a short source does not allocate `len` up front.
pub fn read_exact_vec<R: Read + ?Sized>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![];
    let mut limited = Read::take(&mut *r, len as u64);
    limited.read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(WireError::TruncatedStream);
    }
    Ok(buf)
}

pub fn check_len(what: &'static str, len: u64, max: usize) -> Result<usize> {
    match usize::try_from(len) {
        Ok(len) if len <= max => Ok(len),
        _ => {
            log::warn!("Rejecting {what} of declared length {len}; limit is {max}.");
            Err(WireError::limit(what, len, max))
        }
    }
}

/// ```text
/// struct ByteArray {
///     len:    varint,
///     body:   [u8; len],
/// }
/// ```
pub fn write_bytes<W: Write + ?Sized>(w: &mut W, bytes: &[u8], max_len: usize) -> Result<usize> {
    check_len("byte array", bytes.len() as u64, max_len)?;
    let mut w_len = varint::write_uint(w, bytes.len() as u64)?;
    w.write_all(bytes)?;
    w_len += bytes.len();
    Ok(w_len)
}

pub fn read_bytes<R: Read + ?Sized>(r: &mut R, max_len: usize) -> Result<(usize, Vec<u8>)> {
    let (prefix_len, len) = varint::read_uint(r)?;
    let len = check_len("byte array", len, max_len)?;
    let buf = read_exact_vec(r, len)?;
    Ok((prefix_len + len, buf))
}
