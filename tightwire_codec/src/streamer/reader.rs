use crate::format::Format;
use crate::schema::{TypeHandle, TypeName};
use crate::serde::{
    arrays, bytes, fixed, text, varint, Decimal, ElementKind, FormatLimits, SharedTextEncoding,
    TextEncoding,
};
use crate::{Result, WireError};
use std::any::{self, Any};
use std::io::{BufReader, Read};


/// Everything a value can be read with. The mirror of [`crate::streamer::WireWrite`].
pub trait WireRead {
    fn format(&self) -> &Format;
    fn text_encoding(&self) -> &dyn TextEncoding;
    /// Bytes consumed so far.
    fn position(&self) -> usize;

    fn read_uint(&mut self) -> Result<u64>;
    fn read_int(&mut self) -> Result<i64>;
    fn read_u32(&mut self) -> Result<u32> {
        let v = self.read_uint()?;
        u32::try_from(v).map_err(|_| WireError::malformed(format!("{v} out of u32 range")))
    }
    fn read_i32(&mut self) -> Result<i32> {
        let v = self.read_int()?;
        i32::try_from(v).map_err(|_| WireError::malformed(format!("{v} out of i32 range")))
    }
    fn read_f32(&mut self) -> Result<f32>;
    fn read_f64(&mut self) -> Result<f64>;
    fn read_decimal(&mut self) -> Result<Decimal>;
    fn read_bool(&mut self) -> Result<bool>;
    fn read_bytes(&mut self) -> Result<Vec<u8>>;
    fn read_string(&mut self) -> Result<Option<String>>;

    fn read_bool_array(&mut self) -> Result<Vec<bool>>;
    fn read_i32_array(&mut self) -> Result<Vec<i32>>;
    fn read_i64_array(&mut self) -> Result<Vec<i64>>;
    fn read_f32_array(&mut self) -> Result<Vec<f32>>;
    fn read_f64_array(&mut self) -> Result<Vec<f64>>;
    fn read_decimal_array(&mut self) -> Result<Vec<Decimal>>;
    fn read_string_array(&mut self) -> Result<Vec<Option<String>>>;

    /// `None` for the null handle.
    fn read_type_handle(&mut self) -> Result<Option<TypeName>>;

    /// `None` for the null handle.
    fn read_object(&mut self) -> Result<Option<Box<dyn Any + Send>>>;
}

pub trait WireReadExt: WireRead {
    /// Reads an object and downcasts it.
    /// An object of a different type is malformed input.
    fn read_object_as<T: Any>(&mut self) -> Result<Option<T>> {
        match self.read_object()? {
            None => Ok(None),
            Some(obj) => match obj.downcast::<T>() {
                Ok(t) => Ok(Some(*t)),
                Err(_) => Err(WireError::malformed(format!(
                    "object is not a {}",
                    any::type_name::<T>()
                ))),
            },
        }
    }
}

impl<R: WireRead + ?Sized> WireReadExt for R {}

/// A buffered [`WireRead`] over any [`Read`] source.
pub struct WireReader<'f, R: Read> {
    format: &'f Format,
    encoding: SharedTextEncoding,
    r: BufReader<R>,
    r_len: usize,
}

impl<'f, R: Read> WireReader<'f, R> {
    pub fn new(format: &'f Format, r: R, encoding: SharedTextEncoding) -> Self {
        Self {
            format,
            encoding,
            r: BufReader::new(r),
            r_len: 0,
        }
    }

    /// Bytes already buffered but not yet consumed are lost.
    pub fn into_inner(self) -> R {
        self.r.into_inner()
    }

    fn limits(&self) -> &'f FormatLimits {
        self.format.limits()
    }

    fn track<T>(&mut self, (r_len, t): (usize, T)) -> T {
        self.r_len += r_len;
        t
    }
}

impl<'f, R: Read> WireRead for WireReader<'f, R> {
    fn format(&self) -> &Format {
        self.format
    }
    fn text_encoding(&self) -> &dyn TextEncoding {
        &*self.encoding
    }
    fn position(&self) -> usize {
        self.r_len
    }

    fn read_uint(&mut self) -> Result<u64> {
        let res = varint::read_uint(&mut self.r)?;
        Ok(self.track(res))
    }
    fn read_int(&mut self) -> Result<i64> {
        let res = varint::read_int(&mut self.r)?;
        Ok(self.track(res))
    }
    fn read_f32(&mut self) -> Result<f32> {
        let res = fixed::read_f32(&mut self.r)?;
        Ok(self.track(res))
    }
    fn read_f64(&mut self) -> Result<f64> {
        let res = fixed::read_f64(&mut self.r)?;
        Ok(self.track(res))
    }
    fn read_decimal(&mut self) -> Result<Decimal> {
        let res = fixed::read_decimal(&mut self.r)?;
        Ok(self.track(res))
    }
    fn read_bool(&mut self) -> Result<bool> {
        let res = fixed::read_bool(&mut self.r)?;
        Ok(self.track(res))
    }
    fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let max_len = self.limits().max_elements(ElementKind::Byte);
        let res = bytes::read_bytes(&mut self.r, max_len)?;
        Ok(self.track(res))
    }
    fn read_string(&mut self) -> Result<Option<String>> {
        let max_len = self.limits().max_string_len();
        let res = text::read_string(&mut self.r, &*self.encoding, max_len)?;
        Ok(self.track(res))
    }

    fn read_bool_array(&mut self) -> Result<Vec<bool>> {
        let limits = self.limits();
        let res = arrays::read_array(&mut self.r, limits, ElementKind::Bool, fixed::read_bool)?;
        Ok(self.track(res))
    }
    fn read_i32_array(&mut self) -> Result<Vec<i32>> {
        let limits = self.limits();
        let res = arrays::read_array(&mut self.r, limits, ElementKind::Int, |r| {
            let (r_len, v) = varint::read_int(r)?;
            let v = i32::try_from(v)
                .map_err(|_| WireError::malformed(format!("{v} out of i32 range")))?;
            Ok((r_len, v))
        })?;
        Ok(self.track(res))
    }
    fn read_i64_array(&mut self) -> Result<Vec<i64>> {
        let limits = self.limits();
        let res = arrays::read_array(&mut self.r, limits, ElementKind::Long, varint::read_int)?;
        Ok(self.track(res))
    }
    fn read_f32_array(&mut self) -> Result<Vec<f32>> {
        let limits = self.limits();
        let res = arrays::read_array(&mut self.r, limits, ElementKind::Float, fixed::read_f32)?;
        Ok(self.track(res))
    }
    fn read_f64_array(&mut self) -> Result<Vec<f64>> {
        let limits = self.limits();
        let res = arrays::read_array(&mut self.r, limits, ElementKind::Double, fixed::read_f64)?;
        Ok(self.track(res))
    }
    fn read_decimal_array(&mut self) -> Result<Vec<Decimal>> {
        let limits = self.limits();
        let res =
            arrays::read_array(&mut self.r, limits, ElementKind::Decimal, fixed::read_decimal)?;
        Ok(self.track(res))
    }
    fn read_string_array(&mut self) -> Result<Vec<Option<String>>> {
        let limits = self.limits();
        let res = arrays::read_string_array(&mut self.r, limits, &*self.encoding)?;
        Ok(self.track(res))
    }

    fn read_type_handle(&mut self) -> Result<Option<TypeName>> {
        let raw = self.read_uint()?;
        let handle = u32::try_from(raw)
            .map(TypeHandle::from)
            .map_err(|_| WireError::malformed(format!("type handle {raw} out of range")))?;
        if handle.is_null() {
            return Ok(None);
        }
        let type_name = self.format.schema().resolve(handle)?;
        Ok(Some(type_name))
    }

    fn read_object(&mut self) -> Result<Option<Box<dyn Any + Send>>> {
        let type_name = match self.read_type_handle()? {
            None => return Ok(None),
            Some(type_name) => type_name,
        };
        let format = self.format;
        let codec = format
            .native_by_name(type_name.as_str())
            .ok_or_else(|| WireError::UnregisteredType {
                type_name: type_name.to_string(),
            })?;
        log::trace!("Reading {} object.", type_name);
        let obj = codec.decode(self)?;
        Ok(Some(obj))
    }
}
