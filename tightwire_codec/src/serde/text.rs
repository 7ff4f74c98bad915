use crate::serde::{bytes, varint};
use crate::{Result, WireError};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;
use std::borrow::Cow;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;
use std::sync::Arc;

/// Converts text to and from bytes. Pluggable per writer and reader.
pub trait TextEncoding: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;
    fn encode<'s>(&self, s: &'s str) -> Cow<'s, [u8]>;
    fn decode(&self, bytes: &[u8]) -> Result<String>;
}

pub type SharedTextEncoding = Arc<dyn TextEncoding>;

#[derive(Clone, Copy, Default, Debug)]
pub struct Utf8;

impl TextEncoding for Utf8 {
    fn name(&self) -> &'static str {
        "utf-8"
    }
    fn encode<'s>(&self, s: &'s str) -> Cow<'s, [u8]> {
        Cow::Borrowed(s.as_bytes())
    }
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| WireError::malformed(e.to_string()))
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct Utf16Le;

impl TextEncoding for Utf16Le {
    fn name(&self) -> &'static str {
        "utf-16le"
    }
    fn encode<'s>(&self, s: &'s str) -> Cow<'s, [u8]> {
        let buf = s.encode_utf16().flat_map(u16::to_le_bytes).collect();
        Cow::Owned(buf)
    }
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        if bytes.len() % 2 != 0 {
            return Err(WireError::malformed("odd byte count in utf-16"));
        }
        let units = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .map_err(|e| WireError::malformed(e.to_string()))
    }
}

/// The built-in encodings, nameable from configuration by name or by number.
#[repr(u8)]
#[derive(PartialEq, Eq, Clone, Copy, Default, FromPrimitive, Debug)]
pub enum TextEncodingKind {
    #[default]
    Utf8 = 0,
    Utf16Le = 1,
}

impl TextEncodingKind {
    pub fn shared(self) -> SharedTextEncoding {
        match self {
            Self::Utf8 => Arc::new(Utf8),
            Self::Utf16Le => Arc::new(Utf16Le),
        }
    }
}

impl FromStr for TextEncodingKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        if let Some(kind) = s.parse::<u8>().ok().and_then(Self::from_u8) {
            return Ok(kind);
        }
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16le" | "utf16le" => Ok(Self::Utf16Le),
            _ => Err(anyhow::anyhow!("Unknown text encoding {s:?}")),
        }
    }
}

/// Length prefix of a null string.
pub const NULL_PREFIX: i64 = -1;

/// Encodes and validates a string ahead of writing it,
/// so that a limit violation leaves the sink untouched.
///
/// ```text
/// struct String {
///     len:    zigzag varint,  // -1 null, 0 empty, n > 0 byte length
///     body:   [u8; max(len, 0)],
/// }
/// ```
pub fn encode_string<'s>(
    s: Option<&'s str>,
    enc: &dyn TextEncoding,
    max_len: usize,
) -> Result<Option<Cow<'s, [u8]>>> {
    match s {
        None => Ok(None),
        Some(s) => {
            let buf = enc.encode(s);
            bytes::check_len("string", buf.len() as u64, max_len)?;
            Ok(Some(buf))
        }
    }
}

pub fn write_encoded_string<W: Write + ?Sized>(w: &mut W, buf: Option<&[u8]>) -> Result<usize> {
    match buf {
        None => varint::write_int(w, NULL_PREFIX),
        Some(buf) => {
            let mut w_len = varint::write_int(w, buf.len() as i64)?;
            w.write_all(buf)?;
            w_len += buf.len();
            Ok(w_len)
        }
    }
}

pub fn write_string<W: Write + ?Sized>(
    w: &mut W,
    s: Option<&str>,
    enc: &dyn TextEncoding,
    max_len: usize,
) -> Result<usize> {
    let buf = encode_string(s, enc, max_len)?;
    write_encoded_string(w, buf.as_deref())
}

pub fn read_string<R: Read + ?Sized>(
    r: &mut R,
    enc: &dyn TextEncoding,
    max_len: usize,
) -> Result<(usize, Option<String>)> {
    let (prefix_len, len) = varint::read_int(r)?;
    let len = match len {
        NULL_PREFIX => return Ok((prefix_len, None)),
        0 => return Ok((prefix_len, Some(String::new()))),
        len if len < 0 => {
            return Err(WireError::malformed(format!("string length prefix {len}")));
        }
        len => bytes::check_len("string", len as u64, max_len)?,
    };
    let buf = bytes::read_exact_vec(r, len)?;
    let s = enc.decode(&buf)?;
    Ok((prefix_len + len, Some(s)))
}
