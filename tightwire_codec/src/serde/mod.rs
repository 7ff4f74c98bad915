//! # Serialization format
//!
//! The format carries no self-description.
//! A stream is whatever byte sequence a given sequence of writer calls produces,
//! and a reader must issue the mirrored sequence of calls to decode it.
//!
//! The below pseudocode depicts the representation of each codec.
//!
//! ```text
//! struct UInt {
//!     groups:     [u8; 1..=10],   // 7 bits each, LSB group first, MSB = continuation
//! }
//!
//! struct Int {
//!     groups:     UInt,           // zig-zag: (v << 1) ^ (v >> 63)
//! }
//!
//! struct Float   { body: [u8; 4] }    // IEEE-754, little endian
//! struct Double  { body: [u8; 8] }    // IEEE-754, little endian
//! struct Decimal { body: [u8; 16] }   // see [`Decimal`]
//! struct Bool    { body: u8 }         // 0 or 1; nonzero reads as true
//!
//! struct ByteArray {
//!     len:        UInt,
//!     body:       [u8; len],
//! }
//!
//! struct String {
//!     len:        Int,            // -1 null, 0 empty, n > 0 encoded byte length
//!     body:       [u8; max(len, 0)],
//! }
//!
//! struct Array<T> {
//!     count:      UInt,
//!     elements:   [T; count],
//! }
//!
//! struct TypeHandle {
//!     handle:     UInt,           // 0 null, otherwise assigned by the format's schema
//! }
//!
//! struct Object {
//!     handle:     TypeHandle,
//!     body:       ...,            // the native codec's own call sequence; absent if null
//! }
//! ```
//!
//! Every declared length and count is checked against [`FormatLimits`]
//! before any allocation.

pub mod arrays;
pub mod bytes;
mod decimal;
pub mod fixed;
mod limits;
pub mod text;
pub mod varint;

pub use decimal::*;
pub use limits::*;
pub use text::{SharedTextEncoding, TextEncoding, TextEncodingKind, Utf16Le, Utf8};
