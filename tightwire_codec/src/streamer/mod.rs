//! Writers and readers bound to one [`crate::Format`] and one byte sink or source.
//!
//! A writer and a reader never talk to each other.
//! Decoding is correct only if the reader issues the same sequence of calls,
//! with the same types, as the writer did.

use derive_more::{Add, AddAssign, Deref, From, Into};

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;

/// Count of bytes emitted by one write call.
#[derive(From, Into, Deref, Add, AddAssign, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct WriteLen(usize);
