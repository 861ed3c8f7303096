//! # TON Cell
//!
//! The cell is the unit of all TON data: up to 1023 bits and up to four
//! references to child cells. Contract code, contract storage, messages and
//! getter results are all trees of cells.
//!
//! ## Components
//!
//! - [`Cell`]: immutable, shared, hashed on construction
//! - [`CellBuilder`]: appends bits, integers, strings, addresses and refs
//! - [`CellSlice`]: reads them back in order
//! - [`boc`]: bag-of-cells binary serialization
//!
//! ## Example
//!
//! ```rust
//! use ton_cell::CellBuilder;
//!
//! let mut builder = CellBuilder::new();
//! builder.store_string_tail("Hello World!").unwrap();
//! let cell = builder.end_cell();
//!
//! let text = cell.begin_parse().load_string_tail().unwrap();
//! assert_eq!(text, "Hello World!");
//! ```

pub mod boc;
pub mod builder;
pub mod cell;
pub mod error;
pub mod slice;

pub use builder::CellBuilder;
pub use cell::{Cell, CellHash, MAX_CELL_BITS, MAX_CELL_DEPTH, MAX_CELL_REFS};
pub use error::{CellError, CellResult};
pub use slice::CellSlice;
