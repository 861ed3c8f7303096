//! # TON Primitives
//!
//! Fundamental types shared by every crate in the workspace.
//!
//! - [`Address`]: workchain plus 256-bit account id, raw and user-friendly forms
//! - [`Coins`]: nanoton amounts with TON-denominated parsing
//! - [`checksum`]: CRC16/XMODEM (addresses) and CRC32C (bags of cells)
//!
//! ## Example
//!
//! ```rust
//! use ton_primitives::{Address, Coins};
//!
//! let address: Address = "0:0000000000000000000000000000000000000000000000000000000000000000"
//!     .parse()
//!     .unwrap();
//! assert_eq!(address.workchain(), 0);
//!
//! let value = Coins::from_ton("0.05").unwrap();
//! assert_eq!(value.as_nano(), 50_000_000);
//! ```

pub mod address;
pub mod checksum;
pub mod coins;
pub mod constants;
pub mod error;

pub use address::{Address, FriendlyAddress};
pub use coins::Coins;
pub use constants::*;
pub use error::{PrimitiveError, PrimitiveResult};
