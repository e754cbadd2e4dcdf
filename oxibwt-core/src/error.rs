//! Error types for OxiBWT operations.
//!
//! Every failure in the pipeline falls into one of three kinds: the caller
//! passed something the transforms cannot accept, an encoded stream violates
//! the wire format, or the ranker produced an order that is not a
//! permutation. I/O failures from the byte channel are carried separately.

use std::io;
use thiserror::Error;

/// The main error type for OxiBWT operations.
#[derive(Debug, Error)]
pub enum OxiBwtError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Empty block, out-of-range index or otherwise unusable arguments.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected input.
        message: String,
    },

    /// Encoded data does not follow the wire format.
    #[error("Malformed stream at offset {offset}: {message}")]
    MalformedStream {
        /// Byte offset in the channel where the violation was detected.
        offset: u64,
        /// Description of the violation.
        message: String,
    },

    /// An internal invariant was broken. Indicates a bug, never bad input.
    #[error("Internal invariant violated: {message}")]
    InvariantViolation {
        /// Which invariant failed.
        message: String,
    },
}

/// Result type alias for OxiBWT operations.
pub type Result<T> = std::result::Result<T, OxiBwtError>;

impl OxiBwtError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a malformed stream error.
    pub fn malformed(offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedStream {
            offset,
            message: message.into(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Process exit code for this error kind.
    ///
    /// Codes 70 and 74 follow the BSD `sysexits.h` values for internal
    /// software errors and I/O errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } => 3,
            Self::MalformedStream { .. } => 4,
            Self::InvariantViolation { .. } => 70,
            Self::Io(_) => 74,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiBwtError::invalid_input("block is empty");
        assert!(err.to_string().contains("block is empty"));

        let err = OxiBwtError::malformed(4, "first index 9 out of range");
        let msg = err.to_string();
        assert!(msg.contains("offset 4"));
        assert!(msg.contains("out of range"));

        let err = OxiBwtError::invariant("rotation 3 ranked twice");
        assert!(err.to_string().contains("rotation 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: OxiBwtError = io_err.into();
        assert!(matches!(err, OxiBwtError::Io(_)));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            OxiBwtError::invalid_input("x").exit_code(),
            OxiBwtError::malformed(0, "x").exit_code(),
            OxiBwtError::invariant("x").exit_code(),
            OxiBwtError::from(io::Error::other("x")).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
