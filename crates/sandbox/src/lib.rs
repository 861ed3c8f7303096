//! # TON Sandbox
//!
//! An in-memory chain for tests. Accounts are created by deploy messages
//! whose state init hashes to the destination address; getters are emulated
//! by handlers registered per code hash.
//!
//! ```rust,no_run
//! use ton_sandbox::Blockchain;
//!
//! let chain = Blockchain::new();
//! let deployer = chain.treasury("deployer");
//! ```

pub mod blockchain;
pub mod transaction;
pub mod treasury;

pub use blockchain::{Account, Blockchain, GetterFn, EXIT_CODE_METHOD_NOT_FOUND};
pub use transaction::{Transaction, TransactionKind};
pub use treasury::{Treasury, TREASURY_BALANCE};
