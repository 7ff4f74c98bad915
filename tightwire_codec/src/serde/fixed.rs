//! Fixed-width values. All multi-byte values are little endian.

use crate::serde::Decimal;
use crate::Result;
use std::io::{Read, Write};
use std::mem;

fn read_array<R: Read + ?Sized, const LEN: usize>(r: &mut R) -> Result<[u8; LEN]> {
    let mut buf = [0u8; LEN];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

pub fn write_f32<W: Write + ?Sized>(w: &mut W, value: f32) -> Result<usize> {
    w.write_all(&value.to_bits().to_le_bytes())?;
    Ok(mem::size_of::<f32>())
}
pub fn read_f32<R: Read + ?Sized>(r: &mut R) -> Result<(usize, f32)> {
    let buf = read_array::<_, { mem::size_of::<f32>() }>(r)?;
    Ok((buf.len(), f32::from_bits(u32::from_le_bytes(buf))))
}

pub fn write_f64<W: Write + ?Sized>(w: &mut W, value: f64) -> Result<usize> {
    w.write_all(&value.to_bits().to_le_bytes())?;
    Ok(mem::size_of::<f64>())
}
pub fn read_f64<R: Read + ?Sized>(r: &mut R) -> Result<(usize, f64)> {
    let buf = read_array::<_, { mem::size_of::<f64>() }>(r)?;
    Ok((buf.len(), f64::from_bits(u64::from_le_bytes(buf))))
}

pub fn write_decimal<W: Write + ?Sized>(w: &mut W, value: &Decimal) -> Result<usize> {
    let buf = value.to_le_bytes();
    w.write_all(&buf)?;
    Ok(buf.len())
}
pub fn read_decimal<R: Read + ?Sized>(r: &mut R) -> Result<(usize, Decimal)> {
    let buf = read_array::<_, { Decimal::WIRE_LEN }>(r)?;
    Ok((buf.len(), Decimal::from_le_bytes(buf)?))
}

/// Strictly `0` or `1` on write.
pub fn write_bool<W: Write + ?Sized>(w: &mut W, value: bool) -> Result<usize> {
    w.write_all(&[value as u8])?;
    Ok(1)
}
/// Any nonzero byte reads as `true`.
pub fn read_bool<R: Read + ?Sized>(r: &mut R) -> Result<(usize, bool)> {
    let buf = read_array::<_, 1>(r)?;
    Ok((1, buf[0] != 0))
}
