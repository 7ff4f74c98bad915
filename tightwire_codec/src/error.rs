use crate::schema::TypeHandle;
use derive_more::{Display, Error};
use std::io::{self, ErrorKind};

pub type Result<T, E = WireError> = std::result::Result<T, E>;

/// Every failure a codec operation can report.
///
/// All of them abort the current read or write call. None are retried internally.
#[derive(Display, Error, Debug)]
pub enum WireError {
    /// The bytes do not decode to a valid value of the requested type.
    #[display(fmt = "Malformed encoding: {}", detail)]
    MalformedEncoding { detail: String },

    /// Fewer bytes remain than the current operation requires.
    #[display(fmt = "Truncated stream")]
    TruncatedStream,

    /// A declared length or count exceeds the configured limit.
    /// Raised before anything is allocated or written.
    #[display(fmt = "Limit exceeded for {}: {} > {}", what, len, max)]
    LimitExceeded {
        what: &'static str,
        len: u64,
        max: u64,
    },

    #[display(fmt = "Unknown type handle {}", handle)]
    UnknownHandle { handle: TypeHandle },

    /// No native codec is registered for the type.
    #[display(fmt = "No native codec registered for {}", type_name)]
    UnregisteredType { type_name: String },

    #[display(fmt = "IO error: {}", source)]
    Io { source: io::Error },
}

impl WireError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedEncoding {
            detail: detail.into(),
        }
    }

    pub fn limit(what: &'static str, len: impl TryInto<u64>, max: impl TryInto<u64>) -> Self {
        Self::LimitExceeded {
            what,
            len: len.try_into().unwrap_or(u64::MAX),
            max: max.try_into().unwrap_or(u64::MAX),
        }
    }
}

impl From<io::Error> for WireError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            ErrorKind::UnexpectedEof => Self::TruncatedStream,
            _ => Self::Io { source: e },
        }
    }
}
