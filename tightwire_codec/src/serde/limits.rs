use crate::serde::{bytes, Decimal};
use crate::Result;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::mem;

/// Element types of the bounded array codec.
#[repr(u8)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, ToPrimitive, Debug)]
pub enum ElementKind {
    Byte = 0,
    Bool = 1,
    Int = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    Decimal = 6,
    Str = 7,
}

impl ElementKind {
    pub const COUNT: usize = 8;

    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).filter_map(Self::from_usize)
    }

    /// Bytes one element is charged against the byte-array budget.
    /// Decoded elements may be larger in memory; readers do not reserve by this width.
    pub fn width(self) -> usize {
        match self {
            Self::Byte | Self::Bool => 1,
            Self::Int => mem::size_of::<i32>(),
            Self::Float => mem::size_of::<f32>(),
            Self::Long => mem::size_of::<i64>(),
            Self::Double => mem::size_of::<f64>(),
            Self::Decimal => Decimal::WIRE_LEN,
            // One reference-sized slot per string, independent of the string's own bytes.
            Self::Str => mem::size_of::<u64>(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte array",
            Self::Bool => "bool array",
            Self::Int => "int array",
            Self::Long => "long array",
            Self::Float => "float array",
            Self::Double => "double array",
            Self::Decimal => "decimal array",
            Self::Str => "string array",
        }
    }

    fn idx(self) -> usize {
        self.to_usize().unwrap_or_default()
    }
}

/// Maximum element counts, all derived from one maximum byte-array length.
///
/// Fixed at format construction.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FormatLimits {
    max_byte_array_len: usize,
    max_string_len: usize,
    max_elements: [usize; ElementKind::COUNT],
}

impl FormatLimits {
    pub const DEFAULT_MAX_BYTE_ARRAY_LEN: usize = 16 * 1024 * 1024;
    pub const DEFAULT_MAX_STRING_LEN: usize = Self::DEFAULT_MAX_BYTE_ARRAY_LEN;

    pub fn new(max_byte_array_len: usize, max_string_len: usize) -> Self {
        let mut max_elements = [0; ElementKind::COUNT];
        for kind in ElementKind::all() {
            max_elements[kind.idx()] = max_byte_array_len / kind.width();
        }
        Self {
            max_byte_array_len,
            max_string_len,
            max_elements,
        }
    }

    pub fn max_byte_array_len(&self) -> usize {
        self.max_byte_array_len
    }
    pub fn max_string_len(&self) -> usize {
        self.max_string_len
    }
    pub fn max_elements(&self, kind: ElementKind) -> usize {
        self.max_elements[kind.idx()]
    }

    /// Validates a declared element count. Callers may use this to pre-validate.
    pub fn check_count(&self, kind: ElementKind, count: u64) -> Result<usize> {
        bytes::check_len(kind.name(), count, self.max_elements(kind))
    }
}

impl Default for FormatLimits {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_BYTE_ARRAY_LEN,
            Self::DEFAULT_MAX_STRING_LEN,
        )
    }
}
