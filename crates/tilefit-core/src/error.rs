//! Error handling for TileFit
//!
//! Provides the shared error type used by the settings layer and the
//! binary. Domain crates define their own `thiserror` enums and convert
//! into [`Error`] at the edges.

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a parse error from a string message
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type using the TileFit error
pub type Result<T> = std::result::Result<T, Error>;
