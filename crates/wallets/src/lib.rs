//! TON Wallets Library
//!
//! This crate provides the signing side of contract interaction:
//! - Ed25519 key pairs loaded from hex secrets
//! - A wallet v4 [`Sender`](ton_contract::Sender) that wraps internal
//!   messages into signed external messages and submits them through a
//!   [`ContractProvider`](ton_contract::ContractProvider)

pub mod error;
pub mod key_pair;
pub mod wallet_v4;

pub use error::{WalletError, WalletResult};
pub use key_pair::KeyPair;
pub use wallet_v4::{WalletV4, DEFAULT_WALLET_ID, DEFAULT_VALID_FOR};
