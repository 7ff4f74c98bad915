use crate::format::Format;
use crate::serde::Decimal;
use crate::streamer::{WireRead, WireWrite, WriteLen};
use crate::{Result, WireError};
use std::any;
use std::io::Cursor;

pub trait Ser {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen>;

    fn ser_solo(&self, format: &Format) -> Result<Vec<u8>> {
        let mut w = format.make_writer(vec![], None);
        self.ser(&mut w)?;
        w.into_inner()
    }
}
pub trait Deser: Sized {
    fn deser(r: &mut dyn WireRead) -> Result<Self>;

    fn deser_solo(format: &Format, buf: &[u8]) -> Result<Self> {
        let mut r = format.make_reader(Cursor::new(buf), None);
        Self::deser(&mut r)
    }
}

pub trait Serializable: Ser + Deser {}
impl<T> Serializable for T where T: Ser + Deser {}

macro_rules! impl_by_value {
    ($t:ty, $write:ident, $read:ident) => {
        impl Ser for $t {
            fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
                w.$write(*self)
            }
        }
        impl Deser for $t {
            fn deser(r: &mut dyn WireRead) -> Result<Self> {
                r.$read()
            }
        }
    };
}
impl_by_value!(bool, write_bool, read_bool);
impl_by_value!(i32, write_i32, read_i32);
impl_by_value!(i64, write_int, read_int);
impl_by_value!(u32, write_u32, read_u32);
impl_by_value!(u64, write_uint, read_uint);
impl_by_value!(f32, write_f32, read_f32);
impl_by_value!(f64, write_f64, read_f64);

impl Ser for Decimal {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
        w.write_decimal(self)
    }
}
impl Deser for Decimal {
    fn deser(r: &mut dyn WireRead) -> Result<Self> {
        r.read_decimal()
    }
}

/* Strings. A bare String has no null. */
impl Ser for String {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
        w.write_string(Some(self.as_str()))
    }
}
impl Deser for String {
    fn deser(r: &mut dyn WireRead) -> Result<Self> {
        r.read_string()?.ok_or_else(|| {
            WireError::malformed(format!("null while reading {}", any::type_name::<Self>()))
        })
    }
}
impl Ser for Option<String> {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
        w.write_string(self.as_deref())
    }
}
impl Deser for Option<String> {
    fn deser(r: &mut dyn WireRead) -> Result<Self> {
        r.read_string()
    }
}

/* Arrays */
macro_rules! impl_array {
    ($t:ty, $write:ident, $read:ident) => {
        impl Ser for Vec<$t> {
            fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
                w.$write(self)
            }
        }
        impl Deser for Vec<$t> {
            fn deser(r: &mut dyn WireRead) -> Result<Self> {
                r.$read()
            }
        }
    };
}
impl_array!(u8, write_bytes, read_bytes);
impl_array!(bool, write_bool_array, read_bool_array);
impl_array!(i32, write_i32_array, read_i32_array);
impl_array!(i64, write_i64_array, read_i64_array);
impl_array!(f32, write_f32_array, read_f32_array);
impl_array!(f64, write_f64_array, read_f64_array);
impl_array!(Decimal, write_decimal_array, read_decimal_array);
impl_array!(Option<String>, write_string_array, read_string_array);
