//! Error handling for hemikit
//!
//! Toolpath generation is pure arithmetic, so the only failures are
//! rejected parameters (caught before any output is written) and
//! write errors on the output sink, which are passed through untouched.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for hemikit
///
/// A unified error type shared by the toolpath generators and the
/// settings layer. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Writing to the output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter was rejected before generation started
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a parameter error
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_parameter("radius", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'radius': must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_parameter_error());
        assert_eq!(err.to_string(), "I/O error: pipe closed");
    }
}
