//! Getter stack values.

use crate::error::{ContractError, ContractResult};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::collections::VecDeque;
use std::fmt;
use ton_cell::Cell;
use ton_primitives::Address;

/// One entry of a TVM stack passed to or returned from a getter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleItem {
    /// `null`.
    Null,
    /// 257-bit signed integer.
    Int(BigInt),
    /// Cell.
    Cell(Cell),
    /// Slice over a cell.
    Slice(Cell),
    /// Builder contents.
    Builder(Cell),
}

impl TupleItem {
    /// Kind name used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Cell(_) => "cell",
            Self::Slice(_) => "slice",
            Self::Builder(_) => "builder",
        }
    }
}

impl fmt::Display for TupleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Cell(cell) | Self::Slice(cell) | Self::Builder(cell) => {
                write!(f, "{}({})", self.kind(), cell.hash_hex())
            }
        }
    }
}

/// Pops getter results front to back with type checks.
#[derive(Debug, Clone, Default)]
pub struct TupleReader {
    items: VecDeque<TupleItem>,
}

impl TupleReader {
    /// Wraps a stack, first item on top.
    #[must_use]
    pub fn new(items: Vec<TupleItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Items not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len()
    }

    /// Next item of any kind.
    pub fn read(&mut self) -> ContractResult<TupleItem> {
        self.items.pop_front().ok_or(ContractError::StackType {
            expected: "any item",
            found: "end of stack".to_string(),
        })
    }

    /// Next item as an integer.
    pub fn read_big_number(&mut self) -> ContractResult<BigInt> {
        match self.read()? {
            TupleItem::Int(value) => Ok(value),
            other => Err(mismatch("int", &other)),
        }
    }

    /// Next item as an `i64`.
    pub fn read_number(&mut self) -> ContractResult<i64> {
        let value = self.read_big_number()?;
        value.to_i64().ok_or(ContractError::StackType {
            expected: "int fitting i64",
            found: value.to_string(),
        })
    }

    /// Next item as a cell; slices and builders are accepted too.
    pub fn read_cell(&mut self) -> ContractResult<Cell> {
        match self.read()? {
            TupleItem::Cell(cell) | TupleItem::Slice(cell) | TupleItem::Builder(cell) => Ok(cell),
            other => Err(mismatch("cell", &other)),
        }
    }

    /// Next item as a cell, or `None` for `null`.
    pub fn read_cell_opt(&mut self) -> ContractResult<Option<Cell>> {
        match self.items.front() {
            Some(TupleItem::Null) => {
                self.items.pop_front();
                Ok(None)
            }
            _ => self.read_cell().map(Some),
        }
    }

    /// Next item as a slice holding a `MsgAddress`.
    pub fn read_address(&mut self) -> ContractResult<Option<Address>> {
        let cell = self.read_cell()?;
        Ok(cell.begin_parse().load_address()?)
    }
}

fn mismatch(expected: &'static str, found: &TupleItem) -> ContractError {
    ContractError::StackType {
        expected,
        found: found.kind().to_string(),
    }
}
