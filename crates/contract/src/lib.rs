//! # TON Contract
//!
//! Everything needed to talk to a deployed (or about to be deployed)
//! contract, independent of the transport.
//!
//! ```text
//! ┌────────────────────────────┐
//! │  HelloWorld (wrapper)      │  create_from_config / send_deploy / get_greeting
//! └─────────────┬──────────────┘
//!               │
//! ┌─────────────▼──────────────┐      ┌───────────────┐
//! │  ContractProvider          │◄─────┤  Sender       │
//! │  get_state / run_get_method│      │  (wallet)     │
//! │  send_boc / internal       │      └───────────────┘
//! └─────────────┬──────────────┘
//!               │ RPC client, sandbox
//!               ▼
//! ```
//!
//! ## Components
//!
//! - [`StateInit`]: code and data of a contract; its hash is the address
//! - [`SendMode`], [`SenderArguments`]: how a message is paid for and sent
//! - [`message`]: internal and external message cells
//! - [`TupleItem`], [`TupleReader`]: getter arguments and results
//! - [`CompiledArtifact`]: compiled contract code loaded from the build output
//! - [`HelloWorld`]: the greeting contract wrapper

pub mod artifact;
pub mod error;
pub mod hello_world;
pub mod message;
pub mod provider;
pub mod send_mode;
pub mod state_init;
pub mod tuple;

pub use artifact::CompiledArtifact;
pub use error::{ContractError, ContractResult};
pub use hello_world::{ContractIdentity, HelloWorld, GET_GREETING};
pub use message::{InternalMessage, SenderArguments};
pub use provider::{
    wait_for_deploy, wait_for_deploy_with, AccountState, ContractProvider, Sender,
    DEFAULT_DEPLOY_ATTEMPTS, DEFAULT_DEPLOY_INTERVAL,
};
pub use send_mode::SendMode;
pub use state_init::{contract_address, StateInit};
pub use tuple::{TupleItem, TupleReader};
