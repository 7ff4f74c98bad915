//! Homogeneous arrays with bounded element counts.
//!
//! ```text
//! struct Array<T> {
//!     count:      varint,     // <= FormatLimits::max_elements(T)
//!     elements:   [T; count], // each via T's own codec
//! }
//! ```
//!
//! The count is validated before anything is allocated on read,
//! and before anything is written on write.

use crate::serde::{text, varint, ElementKind, FormatLimits, TextEncoding};
use crate::Result;
use std::io::{Read, Write};

pub fn write_array<W, T>(
    w: &mut W,
    limits: &FormatLimits,
    kind: ElementKind,
    items: &[T],
    mut write_elem: impl FnMut(&mut W, &T) -> Result<usize>,
) -> Result<usize>
where
    W: Write + ?Sized,
{
    limits.check_count(kind, items.len() as u64)?;
    let mut w_len = varint::write_uint(w, items.len() as u64)?;
    for item in items {
        w_len += write_elem(w, item)?;
    }
    Ok(w_len)
}

/// Elements reserved ahead of reading them. Beyond this the buffer grows as elements arrive,
/// so a declared count costs nothing until its elements actually show up.
pub const MAX_PREALLOC_ELEMENTS: usize = 4096;

pub fn read_array<R, T>(
    r: &mut R,
    limits: &FormatLimits,
    kind: ElementKind,
    mut read_elem: impl FnMut(&mut R) -> Result<(usize, T)>,
) -> Result<(usize, Vec<T>)>
where
    R: Read + ?Sized,
{
    let (mut r_len, count) = varint::read_uint(r)?;
    let count = limits.check_count(kind, count)?;

    let mut items = Vec::with_capacity(count.min(MAX_PREALLOC_ELEMENTS));
    for _ in 0..count {
        let (delta_r_len, item) = read_elem(r)?;
        r_len += delta_r_len;
        items.push(item);
    }
    Ok((r_len, items))
}

/// Every element is encoded and length-checked before the count is written.
pub fn write_string_array<W, S>(
    w: &mut W,
    limits: &FormatLimits,
    items: &[Option<S>],
    enc: &dyn TextEncoding,
) -> Result<usize>
where
    W: Write + ?Sized,
    S: AsRef<str>,
{
    limits.check_count(ElementKind::Str, items.len() as u64)?;
    let encoded = items
        .iter()
        .map(|s| text::encode_string(s.as_ref().map(AsRef::as_ref), enc, limits.max_string_len()))
        .collect::<Result<Vec<_>>>()?;

    write_array(w, limits, ElementKind::Str, &encoded, |w, buf| {
        text::write_encoded_string(w, buf.as_deref())
    })
}

pub fn read_string_array<R>(
    r: &mut R,
    limits: &FormatLimits,
    enc: &dyn TextEncoding,
) -> Result<(usize, Vec<Option<String>>)>
where
    R: Read + ?Sized,
{
    read_array(r, limits, ElementKind::Str, |r| {
        text::read_string(r, enc, limits.max_string_len())
    })
}
