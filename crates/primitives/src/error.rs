//! Error types for primitive parsing.

use thiserror::Error;

/// Errors produced while parsing or converting primitive values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Input is not in any recognised address form.
    #[error("Invalid address: {message}")]
    InvalidAddress {
        /// Error message.
        message: String,
    },

    /// User-friendly address checksum does not match.
    #[error("Address checksum mismatch: expected {expected:#06x}, found {found:#06x}")]
    ChecksumMismatch {
        /// Checksum computed over the payload.
        expected: u16,
        /// Checksum carried by the address.
        found: u16,
    },

    /// Amount cannot be represented in nanotons.
    #[error("Invalid amount: {message}")]
    InvalidAmount {
        /// Error message.
        message: String,
    },
}

impl PrimitiveError {
    /// Create an invalid address error.
    pub fn invalid_address<S: Into<String>>(message: S) -> Self {
        Self::InvalidAddress {
            message: message.into(),
        }
    }

    /// Create an invalid amount error.
    pub fn invalid_amount<S: Into<String>>(message: S) -> Self {
        Self::InvalidAmount {
            message: message.into(),
        }
    }
}

/// Result type for primitive operations.
pub type PrimitiveResult<T> = std::result::Result<T, PrimitiveError>;
