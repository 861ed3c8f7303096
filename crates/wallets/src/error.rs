use thiserror::Error;
use ton_contract::ContractError;

/// Result type for wallet operations
pub type WalletResult<T> = std::result::Result<T, WalletError>;

/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// Secret key bytes or hex could not be decoded.
    #[error("Invalid private key: {message}")]
    InvalidPrivateKey {
        /// Error message.
        message: String,
    },

    /// Signature bytes are malformed or do not verify.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Failure while talking to the wallet contract.
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),
}

impl WalletError {
    /// Create an invalid private key error
    pub fn invalid_private_key<S: Into<String>>(message: S) -> Self {
        Self::InvalidPrivateKey {
            message: message.into(),
        }
    }
}
