//! Base-128 variable-length integers.
//!
//! Each byte carries 7 data bits, least significant group first.
//! The high bit is set on every byte except the last.
//!
//! ```text
//! 0       => [0x00]
//! 127     => [0x7F]
//! 128     => [0x80, 0x01]
//! 300     => [0xAC, 0x02]
//! u64::MAX => [0xFF; 9] ++ [0x01]
//! ```
//!
//! Signed integers are zig-zag mapped first, so that `-1` costs one byte.

use crate::{Result, WireError};
use std::io::{Read, Write};


/// A `u64` never needs more than this many groups.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const DATA_MASK: u8 = 0x7F;

pub fn encoded_len(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let sig_bits = 64 - value.leading_zeros() as usize;
    (sig_bits + 6) / 7
}

fn encode_uint(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut len = 0;
    loop {
        let low7 = (value as u8) & DATA_MASK;
        value >>= 7;
        if value == 0 {
            buf[len] = low7;
            return len + 1;
        }
        buf[len] = low7 | CONTINUATION;
        len += 1;
    }
}

pub fn write_uint<W: Write + ?Sized>(w: &mut W, value: u64) -> Result<usize> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode_uint(value, &mut buf);
    w.write_all(&buf[..len])?;
    Ok(len)
}

/// Returns `(r_len, value)`.
pub fn read_uint<R: Read + ?Sized>(r: &mut R) -> Result<(usize, u64)> {
    let mut value = 0u64;
    let mut r_len = 0;
    loop {
        let mut byte = [0u8; 1];
        r.read_exact(&mut byte)?;
        let byte = byte[0];
        let data = u64::from(byte & DATA_MASK);
        let shift = 7 * r_len as u32;
        r_len += 1;

        /* The 10th group may only hold bit 63, and must terminate. */
        if r_len == MAX_VARINT_LEN && (data > 1 || byte & CONTINUATION != 0) {
            return Err(WireError::malformed("varint overflows 64 bits"));
        }
        value |= data << shift;

        if byte & CONTINUATION == 0 {
            if r_len > 1 && data == 0 {
                return Err(WireError::malformed("non-minimal varint"));
            }
            return Ok((r_len, value));
        }
    }
}

pub fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

pub fn write_int<W: Write + ?Sized>(w: &mut W, value: i64) -> Result<usize> {
    write_uint(w, zigzag(value))
}

pub fn read_int<R: Read + ?Sized>(r: &mut R) -> Result<(usize, i64)> {
    let (r_len, raw) = read_uint(r)?;
    Ok((r_len, unzigzag(raw)))
}
