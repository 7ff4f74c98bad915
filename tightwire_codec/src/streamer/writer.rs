use crate::format::Format;
use crate::schema::{TypeHandle, TypeName};
use crate::serde::{
    arrays, bytes, fixed, text, varint, Decimal, ElementKind, FormatLimits, SharedTextEncoding,
    TextEncoding,
};
use crate::streamer::WriteLen;
use crate::{Result, WireError};
use std::any::Any;
use std::io::{BufWriter, Write};
use std::sync::Arc;


/// Everything a value can be written with.
///
/// Object safe, so native codecs and [`crate::types::Ser`] impls work against `&mut dyn WireWrite`.
pub trait WireWrite {
    fn format(&self) -> &Format;
    fn text_encoding(&self) -> &dyn TextEncoding;
    /// Bytes written so far.
    fn position(&self) -> usize;

    fn write_uint(&mut self, value: u64) -> Result<WriteLen>;
    fn write_int(&mut self, value: i64) -> Result<WriteLen>;
    fn write_u32(&mut self, value: u32) -> Result<WriteLen> {
        self.write_uint(u64::from(value))
    }
    fn write_i32(&mut self, value: i32) -> Result<WriteLen> {
        self.write_int(i64::from(value))
    }
    fn write_f32(&mut self, value: f32) -> Result<WriteLen>;
    fn write_f64(&mut self, value: f64) -> Result<WriteLen>;
    fn write_decimal(&mut self, value: &Decimal) -> Result<WriteLen>;
    fn write_bool(&mut self, value: bool) -> Result<WriteLen>;
    fn write_bytes(&mut self, value: &[u8]) -> Result<WriteLen>;
    fn write_string(&mut self, value: Option<&str>) -> Result<WriteLen>;

    fn write_bool_array(&mut self, items: &[bool]) -> Result<WriteLen>;
    fn write_i32_array(&mut self, items: &[i32]) -> Result<WriteLen>;
    fn write_i64_array(&mut self, items: &[i64]) -> Result<WriteLen>;
    fn write_f32_array(&mut self, items: &[f32]) -> Result<WriteLen>;
    fn write_f64_array(&mut self, items: &[f64]) -> Result<WriteLen>;
    fn write_decimal_array(&mut self, items: &[Decimal]) -> Result<WriteLen>;
    fn write_string_array(&mut self, items: &[Option<String>]) -> Result<WriteLen>;

    /// `None` writes the null handle.
    fn write_type_handle(&mut self, type_name: Option<&TypeName>) -> Result<WriteLen>;

    /// Writes the value's type handle, then the value through its native codec.
    /// `None` writes the null handle only.
    fn write_object(&mut self, value: Option<&dyn Any>) -> Result<WriteLen>;
}

/// A buffered [`WireWrite`] over any [`Write`] sink.
pub struct WireWriter<'f, W: Write> {
    format: &'f Format,
    encoding: SharedTextEncoding,
    w: BufWriter<W>,
    w_len: usize,
}

impl<'f, W: Write> WireWriter<'f, W> {
    pub fn new(format: &'f Format, w: W, encoding: SharedTextEncoding) -> Self {
        Self {
            format,
            encoding,
            w: BufWriter::new(w),
            w_len: 0,
        }
    }

    /// Pushes buffered bytes through to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }

    /// The sink. Bytes not yet flushed are not in it.
    pub fn get_ref(&self) -> &W {
        self.w.get_ref()
    }

    /// Flushes, then returns the sink.
    pub fn into_inner(self) -> Result<W> {
        let w = self.w.into_inner().map_err(|e| e.into_error())?;
        Ok(w)
    }

    fn limits(&self) -> &'f FormatLimits {
        self.format.limits()
    }

    fn track(&mut self, w_len: usize) -> WriteLen {
        self.w_len += w_len;
        WriteLen::from(w_len)
    }
}

impl<'f, W: Write> WireWrite for WireWriter<'f, W> {
    fn format(&self) -> &Format {
        self.format
    }
    fn text_encoding(&self) -> &dyn TextEncoding {
        &*self.encoding
    }
    fn position(&self) -> usize {
        self.w_len
    }

    fn write_uint(&mut self, value: u64) -> Result<WriteLen> {
        let w_len = varint::write_uint(&mut self.w, value)?;
        Ok(self.track(w_len))
    }
    fn write_int(&mut self, value: i64) -> Result<WriteLen> {
        let w_len = varint::write_int(&mut self.w, value)?;
        Ok(self.track(w_len))
    }
    fn write_f32(&mut self, value: f32) -> Result<WriteLen> {
        let w_len = fixed::write_f32(&mut self.w, value)?;
        Ok(self.track(w_len))
    }
    fn write_f64(&mut self, value: f64) -> Result<WriteLen> {
        let w_len = fixed::write_f64(&mut self.w, value)?;
        Ok(self.track(w_len))
    }
    fn write_decimal(&mut self, value: &Decimal) -> Result<WriteLen> {
        let w_len = fixed::write_decimal(&mut self.w, value)?;
        Ok(self.track(w_len))
    }
    fn write_bool(&mut self, value: bool) -> Result<WriteLen> {
        let w_len = fixed::write_bool(&mut self.w, value)?;
        Ok(self.track(w_len))
    }
    fn write_bytes(&mut self, value: &[u8]) -> Result<WriteLen> {
        let max_len = self.limits().max_elements(ElementKind::Byte);
        let w_len = bytes::write_bytes(&mut self.w, value, max_len)?;
        Ok(self.track(w_len))
    }
    fn write_string(&mut self, value: Option<&str>) -> Result<WriteLen> {
        let max_len = self.limits().max_string_len();
        let w_len = text::write_string(&mut self.w, value, &*self.encoding, max_len)?;
        Ok(self.track(w_len))
    }

    fn write_bool_array(&mut self, items: &[bool]) -> Result<WriteLen> {
        let limits = self.limits();
        let w_len = arrays::write_array(&mut self.w, limits, ElementKind::Bool, items, |w, x| {
            fixed::write_bool(w, *x)
        })?;
        Ok(self.track(w_len))
    }
    fn write_i32_array(&mut self, items: &[i32]) -> Result<WriteLen> {
        let limits = self.limits();
        let w_len = arrays::write_array(&mut self.w, limits, ElementKind::Int, items, |w, x| {
            varint::write_int(w, i64::from(*x))
        })?;
        Ok(self.track(w_len))
    }
    fn write_i64_array(&mut self, items: &[i64]) -> Result<WriteLen> {
        let limits = self.limits();
        let w_len = arrays::write_array(&mut self.w, limits, ElementKind::Long, items, |w, x| {
            varint::write_int(w, *x)
        })?;
        Ok(self.track(w_len))
    }
    fn write_f32_array(&mut self, items: &[f32]) -> Result<WriteLen> {
        let limits = self.limits();
        let w_len = arrays::write_array(&mut self.w, limits, ElementKind::Float, items, |w, x| {
            fixed::write_f32(w, *x)
        })?;
        Ok(self.track(w_len))
    }
    fn write_f64_array(&mut self, items: &[f64]) -> Result<WriteLen> {
        let limits = self.limits();
        let w_len = arrays::write_array(&mut self.w, limits, ElementKind::Double, items, |w, x| {
            fixed::write_f64(w, *x)
        })?;
        Ok(self.track(w_len))
    }
    fn write_decimal_array(&mut self, items: &[Decimal]) -> Result<WriteLen> {
        let limits = self.limits();
        let w_len = arrays::write_array(&mut self.w, limits, ElementKind::Decimal, items, |w, x| {
            fixed::write_decimal(w, x)
        })?;
        Ok(self.track(w_len))
    }
    fn write_string_array(&mut self, items: &[Option<String>]) -> Result<WriteLen> {
        let limits = self.limits();
        let w_len = arrays::write_string_array(&mut self.w, limits, items, &*self.encoding)?;
        Ok(self.track(w_len))
    }

    fn write_type_handle(&mut self, type_name: Option<&TypeName>) -> Result<WriteLen> {
        let handle = match type_name {
            None => TypeHandle::NULL,
            Some(type_name) => self.format.schema().get_or_assign(type_name)?,
        };
        self.write_uint(u64::from(u32::from(handle)))
    }

    fn write_object(&mut self, value: Option<&dyn Any>) -> Result<WriteLen> {
        let value = match value {
            None => return self.write_type_handle(None),
            Some(value) => value,
        };
        let format = self.format;
        let codec = format
            .native_for_type_id((*value).type_id())
            .ok_or_else(|| WireError::UnregisteredType {
                // `Any` carries no type name.
                type_name: format!("value of unregistered type {:?}", (*value).type_id()),
            })?;

        /* Stage the body, so that a failing codec leaves the sink untouched. */
        let mut scratch = WireWriter::new(format, vec![], Arc::clone(&self.encoding));
        codec.encode(value, &mut scratch)?;
        let body = scratch.into_inner()?;

        log::trace!("Writing {} object, {} body bytes.", codec.type_name(), body.len());

        let mut w_len = self.write_type_handle(Some(codec.type_name()))?;
        self.w.write_all(&body)?;
        w_len += self.track(body.len());
        Ok(w_len)
    }
}
