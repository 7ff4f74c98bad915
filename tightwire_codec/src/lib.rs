//! A compact binary format with a per-session type schema.
//!
//! Build one [`Format`], then make any number of [`WireWriter`]s and [`WireReader`]s from it.
//! Type handles written through one writer resolve through any reader of the same `Format`.

pub mod config;
mod error;
pub mod format;
pub mod schema;
pub mod serde;
pub mod streamer;
pub mod types;

pub use config::FormatConfig;
pub use error::{Result, WireError};
pub use format::{Format, FormatBuilder, NativeCodec};
pub use schema::{TypeHandle, TypeName, TypeSchema};
pub use serde::{Decimal, ElementKind, FormatLimits, TextEncoding, TextEncodingKind};
pub use streamer::{WireRead, WireReadExt, WireReader, WireWrite, WireWriter, WriteLen};
pub use types::{Deser, Ser, Serializable};
