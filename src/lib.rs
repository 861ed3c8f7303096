//! # ton-hello-rs: the HelloWorld greeting contract on TON
//!
//! Build, deploy and query the HelloWorld contract. The contract stores a
//! greeting set at deployment and returns it from the `getGreeting` getter.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ton_hello_rs::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = RpcClient::builder("https://testnet.toncenter.com/api/v2".parse()?).build()?;
//! let contract = HelloWorld::create_from_address(
//!     "kQAyPdkpHHVKUllXuTEN4zP9Qju-eGIUx9wYnjDKBhnWZ9l-".parse()?,
//! );
//! println!("Greeting: {}", contract.get_greeting(&provider).await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`primitives`] - addresses, coin amounts, checksums
//! - [`cell`] - cells, builders, slices and bag-of-cells serialization
//! - [`contract`] - state init, messages, provider and sender seams, the
//!   HelloWorld wrapper
//! - [`wallets`] - key pairs and the wallet v4 sender
//! - [`config`] - script configuration
//! - `rpc_client` - Toncenter JSON-RPC provider (feature `rpc`)
//! - `sandbox` - in-memory chain for tests (feature `sandbox`)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use ton_cell as cell;
pub use ton_config as config;
pub use ton_contract as contract;
pub use ton_primitives as primitives;
pub use ton_wallets as wallets;

#[cfg(feature = "rpc")]
pub use ton_rpc_client as rpc_client;

#[cfg(feature = "sandbox")]
pub use ton_sandbox as sandbox;

/// Common imports for HelloWorld development
pub mod prelude {
    pub use crate::cell::{Cell, CellBuilder, CellSlice};
    pub use crate::contract::{
        wait_for_deploy, CompiledArtifact, ContractError, ContractIdentity, ContractProvider,
        HelloWorld, SendMode, Sender, StateInit,
    };
    pub use crate::primitives::{Address, Coins};
    pub use crate::wallets::{KeyPair, WalletV4};

    #[cfg(feature = "rpc")]
    pub use crate::rpc_client::RpcClient;

    #[cfg(feature = "sandbox")]
    pub use crate::sandbox::Blockchain;
}
