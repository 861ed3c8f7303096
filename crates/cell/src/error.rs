//! Error types for cell construction, parsing and serialization.

use thiserror::Error;
use ton_primitives::PrimitiveError;

/// Errors that can occur while working with cells.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// Writing would exceed the 1023-bit limit.
    #[error("Cell overflow: {requested} bits requested, {available} available")]
    BitOverflow {
        /// Bits the write needed.
        requested: usize,
        /// Bits left in the builder.
        available: usize,
    },

    /// Writing would exceed the four-reference limit.
    #[error("Cell overflow: no reference slots left")]
    RefOverflow,

    /// Referencing a cell would make the tree deeper than allowed.
    #[error("Cell depth {depth} exceeds the limit of 1024")]
    DepthOverflow {
        /// Depth the new tree would have.
        depth: usize,
    },

    /// Reading past the end of a slice.
    #[error("Cell underflow: {requested} bits requested, {remaining} remaining")]
    BitUnderflow {
        /// Bits the read needed.
        requested: usize,
        /// Bits left in the slice.
        remaining: usize,
    },

    /// Reading a reference that is not there.
    #[error("Cell underflow: no references left")]
    RefUnderflow,

    /// A value does not fit into the requested bit width.
    #[error("Value {value} does not fit into {bits} bits")]
    ValueOutOfRange {
        /// Value being stored.
        value: String,
        /// Target width.
        bits: usize,
    },

    /// Data that should have been consumed is still present.
    #[error("Slice not fully consumed: {bits} bits and {refs} refs left")]
    NotConsumed {
        /// Unread bits.
        bits: usize,
        /// Unread references.
        refs: usize,
    },

    /// String payload is malformed.
    #[error("Invalid string tail: {message}")]
    InvalidString {
        /// Error message.
        message: String,
    },

    /// Exotic cells are not handled by this crate.
    #[error("Unsupported cell: {message}")]
    Unsupported {
        /// Error message.
        message: String,
    },

    /// Malformed bag of cells.
    #[error("Invalid BOC: {message}")]
    InvalidBoc {
        /// Error message.
        message: String,
    },

    /// Bag of cells checksum does not match.
    #[error("BOC checksum mismatch: expected {expected:#010x}, found {found:#010x}")]
    ChecksumMismatch {
        /// CRC32C computed over the payload.
        expected: u32,
        /// CRC32C stored in the trailer.
        found: u32,
    },

    /// Address field could not be decoded.
    #[error("Address error: {0}")]
    Address(#[from] PrimitiveError),
}

impl CellError {
    /// Create an underflow error.
    pub fn underflow(requested: usize, remaining: usize) -> Self {
        Self::BitUnderflow {
            requested,
            remaining,
        }
    }

    /// Create an invalid string error.
    pub fn invalid_string<S: Into<String>>(message: S) -> Self {
        Self::InvalidString {
            message: message.into(),
        }
    }

    /// Create an unsupported cell error.
    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create an invalid BOC error.
    pub fn invalid_boc<S: Into<String>>(message: S) -> Self {
        Self::InvalidBoc {
            message: message.into(),
        }
    }
}

/// Result type for cell operations.
pub type CellResult<T> = std::result::Result<T, CellError>;
