use std::fmt;
use thiserror::Error;

/// Code used for transport and decoding failures.
pub const INTERNAL_ERROR: i32 = -32603;

/// Code used when the response body is not valid JSON.
pub const PARSE_ERROR: i32 = -32700;

/// Error returned by the node or raised while talking to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct RpcException {
    /// Error code reported by the node, or a JSON-RPC code for local failures
    pub code: i32,

    /// Error message
    pub message: String,
}

impl RpcException {
    /// Creates a new RPC exception
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

impl fmt::Display for RpcException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}
