//! Fatal pipeline errors.

use derive_more::Display;
use std::io;

#[derive(Debug, Display)]
pub enum Error {
    /// An I/O failure on an input, output, or temporary file.
    #[display(fmt = "io error: {}", _0)]
    Io(io::Error),
    /// The memory budget cannot give every buffer slot one record.
    #[display(fmt = "memory budget of {} bytes is too small", _0)]
    Budget(usize),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Budget(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
