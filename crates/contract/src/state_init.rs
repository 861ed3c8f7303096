//! Contract initial state and address derivation.

use crate::error::ContractResult;
use ton_cell::{Cell, CellBuilder, CellError};
use ton_primitives::Address;

/// Code and data of a contract before deployment.
///
/// Encoded as `split_depth:0 special:0 code:^Cell data:^Cell library:0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInit {
    /// Compiled contract code.
    pub code: Cell,
    /// Initial persistent storage.
    pub data: Cell,
}

impl StateInit {
    /// Bundles code and data.
    #[must_use]
    pub fn new(code: Cell, data: Cell) -> Self {
        Self { code, data }
    }

    /// Serializes to a cell.
    pub fn to_cell(&self) -> ContractResult<Cell> {
        let mut builder = CellBuilder::new();
        builder
            .store_bit(false)?
            .store_bit(false)?
            .store_maybe_ref(Some(&self.code))?
            .store_maybe_ref(Some(&self.data))?
            .store_bit(false)?;
        Ok(builder.end_cell())
    }

    /// Parses a state init that carries both code and data.
    pub fn from_cell(cell: &Cell) -> ContractResult<Self> {
        let mut slice = cell.begin_parse();
        if slice.load_bit()? {
            slice.skip(5)?;
        }
        if slice.load_bit()? {
            slice.skip(2)?;
        }
        let code = slice
            .load_maybe_ref()?
            .ok_or_else(|| CellError::unsupported("state init without code"))?;
        let data = slice
            .load_maybe_ref()?
            .ok_or_else(|| CellError::unsupported("state init without data"))?;
        if slice.load_bit()? {
            return Err(CellError::unsupported("state init with libraries").into());
        }
        Ok(Self { code, data })
    }

    /// Address this state deploys to in `workchain`.
    pub fn address(&self, workchain: i8) -> ContractResult<Address> {
        contract_address(workchain, self)
    }
}

/// Derives the address of a contract from its initial state.
///
/// The account id is the representation hash of the `StateInit` cell, so
/// the same code and data always land on the same address.
pub fn contract_address(workchain: i8, init: &StateInit) -> ContractResult<Address> {
    let cell = init.to_cell()?;
    Ok(Address::new(workchain, *cell.hash()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_cell(bytes: &[u8]) -> Cell {
        let mut builder = CellBuilder::new();
        builder.store_bytes(bytes).unwrap();
        builder.end_cell()
    }

    #[test]
    fn test_layout() {
        let init = StateInit::new(bytes_cell(&[1]), bytes_cell(&[2]));
        let cell = init.to_cell().unwrap();
        assert_eq!(cell.bit_len(), 5);
        assert_eq!(cell.data(), &[0b0011_0000]);
        assert_eq!(cell.refs().len(), 2);
        assert_eq!(StateInit::from_cell(&cell).unwrap(), init);
    }

    #[test]
    fn test_address_vector() {
        let mut storage = CellBuilder::new();
        storage.store_ref(bytes_cell(b"Hello World!")).unwrap();
        let init = StateInit::new(bytes_cell(&[0xde, 0xad, 0xbe, 0xef]), storage.end_cell());

        let address = init.address(0).unwrap();
        assert_eq!(
            address.to_raw_string(),
            "0:0cf68b7ce880fd64850c6217bad4ae2b2809b4c9fade59f70be76ddd65459cfe"
        );
        assert_eq!(init.address(-1).unwrap().hash(), address.hash());
    }
}
