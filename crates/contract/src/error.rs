//! Error types for contract interaction.

use thiserror::Error;
use ton_cell::CellError;
use ton_primitives::{Address, PrimitiveError};

/// Errors that can occur while building, sending or querying contracts.
#[derive(Error, Debug)]
pub enum ContractError {
    /// Deploy requested on a handle that carries no init package.
    #[error("Contract {address} has no init package; build it with create_from_config to deploy")]
    MissingInit {
        /// Address of the handle.
        address: Address,
    },

    /// Contract does not exist at the address.
    #[error("Contract not deployed: {address}")]
    NotDeployed {
        /// Queried address.
        address: Address,
    },

    /// Getter ran but did not exit cleanly.
    #[error("Getter {method} failed with exit code {exit_code}")]
    GetterFailed {
        /// Getter name.
        method: String,
        /// TVM exit code.
        exit_code: i32,
    },

    /// Getter stack did not hold the expected item.
    #[error("Unexpected stack item: expected {expected}, found {found}")]
    StackType {
        /// Expected item kind.
        expected: &'static str,
        /// Actual item kind.
        found: String,
    },

    /// Deployment was not observed in time.
    #[error("Contract {address} not active after {attempts} attempts")]
    DeployTimeout {
        /// Awaited address.
        address: Address,
        /// Polls performed.
        attempts: u32,
    },

    /// Compiled artifact cannot be used.
    #[error("Invalid artifact: {message}")]
    InvalidArtifact {
        /// Error message.
        message: String,
    },

    /// Sender rejected the message.
    #[error("Sender error: {message}")]
    Sender {
        /// Error message.
        message: String,
    },

    /// Transport or node error surfaced by a provider.
    #[error("Provider error: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Cell encoding or decoding failed.
    #[error("Cell error: {0}")]
    Cell(#[from] CellError),

    /// Primitive parsing failed.
    #[error("Primitive error: {0}")]
    Primitive(#[from] PrimitiveError),
}

impl ContractError {
    /// Create an invalid artifact error.
    pub fn invalid_artifact<S: Into<String>>(message: S) -> Self {
        Self::InvalidArtifact {
            message: message.into(),
        }
    }

    /// Create a sender error.
    pub fn sender<S: Into<String>>(message: S) -> Self {
        Self::Sender {
            message: message.into(),
        }
    }

    /// Wrap a provider-level error.
    pub fn provider<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider(Box::new(error))
    }
}

/// Result type for contract operations.
pub type ContractResult<T> = std::result::Result<T, ContractError>;
