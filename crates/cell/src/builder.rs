//! Cell builder.

use crate::cell::{check_child_depth, Cell, MAX_CELL_BITS, MAX_CELL_DEPTH, MAX_CELL_REFS};
use crate::error::{CellError, CellResult};
use crate::slice::CellSlice;
use ton_primitives::Address;

/// Appends data to a cell under construction.
#[derive(Debug, Clone, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl CellBuilder {
    /// Starts an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits written so far.
    #[inline]
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Bits that can still be written.
    #[inline]
    #[must_use]
    pub fn available_bits(&self) -> usize {
        MAX_CELL_BITS - self.bit_len
    }

    /// Reference slots still free.
    #[inline]
    #[must_use]
    pub fn available_refs(&self) -> usize {
        MAX_CELL_REFS - self.refs.len()
    }

    fn ensure_bits(&self, bits: usize) -> CellResult<()> {
        if bits > self.available_bits() {
            return Err(CellError::BitOverflow {
                requested: bits,
                available: self.available_bits(),
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Writes one bit.
    pub fn store_bit(&mut self, bit: bool) -> CellResult<&mut Self> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Writes the first `bit_len` bits of `data` (MSB first).
    pub fn store_bits(&mut self, data: &[u8], bit_len: usize) -> CellResult<&mut Self> {
        if bit_len > data.len() * 8 {
            return Err(CellError::underflow(bit_len, data.len() * 8));
        }
        self.ensure_bits(bit_len)?;
        if self.bit_len % 8 == 0 && bit_len % 8 == 0 {
            self.data.extend_from_slice(&data[..bit_len / 8]);
            self.bit_len += bit_len;
        } else {
            for i in 0..bit_len {
                self.push_bit(data[i / 8] & (0x80 >> (i % 8)) != 0);
            }
        }
        Ok(self)
    }

    /// Writes whole bytes.
    pub fn store_bytes(&mut self, bytes: &[u8]) -> CellResult<&mut Self> {
        self.store_bits(bytes, bytes.len() * 8)
    }

    /// Writes an unsigned integer of `bits` width (at most 128).
    pub fn store_uint(&mut self, value: u128, bits: usize) -> CellResult<&mut Self> {
        if bits > 128 || (bits < 128 && value >> bits != 0) {
            return Err(CellError::ValueOutOfRange {
                value: value.to_string(),
                bits,
            });
        }
        self.ensure_bits(bits)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Writes a two's complement signed integer of `bits` width (at most 128).
    pub fn store_int(&mut self, value: i128, bits: usize) -> CellResult<&mut Self> {
        let fits = match bits {
            0 => value == 0,
            1..=127 => {
                let bound = 1i128 << (bits - 1);
                (-bound..bound).contains(&value)
            }
            128 => true,
            _ => false,
        };
        if !fits {
            return Err(CellError::ValueOutOfRange {
                value: value.to_string(),
                bits,
            });
        }
        let mask = if bits == 128 { u128::MAX } else { (1u128 << bits) - 1 };
        self.store_uint(value as u128 & mask, bits)
    }

    /// Writes a `VarUInteger 16` amount: 4-bit byte length then the bytes.
    pub fn store_coins(&mut self, nano: u128) -> CellResult<&mut Self> {
        let len = (128 - nano.leading_zeros() as usize).div_ceil(8);
        if len > 15 {
            return Err(CellError::ValueOutOfRange {
                value: nano.to_string(),
                bits: 120,
            });
        }
        self.ensure_bits(4 + len * 8)?;
        self.store_uint(len as u128, 4)?;
        self.store_bytes(&nano.to_be_bytes()[16 - len..])
    }

    /// Writes `addr_std` for `Some`, `addr_none` for `None`.
    pub fn store_address(&mut self, address: Option<&Address>) -> CellResult<&mut Self> {
        match address {
            None => self.store_uint(0, 2),
            Some(address) => {
                self.ensure_bits(267)?;
                self.store_uint(0b10, 2)?;
                self.store_bit(false)?;
                self.store_int(address.workchain() as i128, 8)?;
                self.store_bytes(address.hash())
            }
        }
    }

    /// Adds a child reference.
    pub fn store_ref(&mut self, cell: Cell) -> CellResult<&mut Self> {
        if self.available_refs() == 0 {
            return Err(CellError::RefOverflow);
        }
        check_child_depth(&cell)?;
        self.refs.push(cell);
        Ok(self)
    }

    /// Writes a `Maybe ^Cell`: a presence bit, then the reference if any.
    pub fn store_maybe_ref(&mut self, cell: Option<&Cell>) -> CellResult<&mut Self> {
        match cell {
            Some(cell) => {
                if self.available_refs() == 0 {
                    return Err(CellError::RefOverflow);
                }
                self.store_bit(true)?;
                self.store_ref(cell.clone())
            }
            None => self.store_bit(false),
        }
    }

    /// Copies the unread bits and references of a slice.
    pub fn store_slice(&mut self, slice: &CellSlice) -> CellResult<&mut Self> {
        let (data, bits) = slice.remaining_data();
        let refs = slice.remaining_ref_cells();
        if refs.len() > self.available_refs() {
            return Err(CellError::RefOverflow);
        }
        self.store_bits(&data, bits)?;
        self.refs.extend(refs);
        Ok(self)
    }

    /// Copies the contents of another builder.
    pub fn store_builder(&mut self, other: &CellBuilder) -> CellResult<&mut Self> {
        if other.refs.len() > self.available_refs() {
            return Err(CellError::RefOverflow);
        }
        self.store_bits(&other.data, other.bit_len)?;
        self.refs.extend(other.refs.iter().cloned());
        Ok(self)
    }

    /// Writes a string as a snake-encoded tail.
    ///
    /// As many whole bytes as fit go into this cell; the rest continues in a
    /// chain of child cells, each linked through its single reference.
    pub fn store_string_tail(&mut self, text: &str) -> CellResult<&mut Self> {
        self.store_snake_bytes(text.as_bytes())
    }

    /// Writes a string tail into a fresh child cell stored as a reference.
    pub fn store_string_ref_tail(&mut self, text: &str) -> CellResult<&mut Self> {
        let mut child = CellBuilder::new();
        child.store_string_tail(text)?;
        self.store_ref(child.end_cell())
    }

    fn store_snake_bytes(&mut self, bytes: &[u8]) -> CellResult<&mut Self> {
        let fits = self.available_bits() / 8;
        if bytes.len() <= fits {
            return self.store_bytes(bytes);
        }
        if self.available_refs() == 0 {
            return Err(CellError::RefOverflow);
        }

        let (head, tail) = bytes.split_at(fits);
        let chunks: Vec<&[u8]> = tail.chunks(MAX_CELL_BITS / 8).collect();
        if chunks.len() > usize::from(MAX_CELL_DEPTH) {
            return Err(CellError::DepthOverflow {
                depth: chunks.len(),
            });
        }

        // Tail first, so each link is finished before its parent.
        let mut next: Option<Cell> = None;
        for chunk in chunks.into_iter().rev() {
            let mut link = CellBuilder::new();
            link.store_bytes(chunk)?;
            if let Some(cell) = next.take() {
                link.store_ref(cell)?;
            }
            next = Some(link.end_cell());
        }
        self.store_bytes(head)?;
        match next {
            Some(cell) => self.store_ref(cell),
            None => Ok(self),
        }
    }

    /// Finishes the cell.
    #[must_use]
    pub fn end_cell(&self) -> Cell {
        Cell::from_parts(self.data.clone(), self.bit_len, self.refs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_uint_layout() {
        let mut builder = CellBuilder::new();
        builder.store_uint(0b101, 3).unwrap();
        builder.store_uint(0xff, 8).unwrap();
        let cell = builder.end_cell();
        assert_eq!(cell.bit_len(), 11);
        assert_eq!(cell.data(), &[0b1011_1111, 0b1110_0000]);
    }

    #[test]
    fn test_store_uint_out_of_range() {
        let mut builder = CellBuilder::new();
        assert!(builder.store_uint(8, 3).is_err());
        assert!(builder.store_int(-129, 8).is_err());
        assert!(builder.store_int(127, 8).is_ok());
        assert!(builder.store_int(-128, 8).is_ok());
    }

    #[test]
    fn test_bit_overflow() {
        let mut builder = CellBuilder::new();
        builder.store_bits(&[0u8; 128], 1023).unwrap();
        assert_eq!(builder.available_bits(), 0);
        assert!(matches!(
            builder.store_bit(true),
            Err(CellError::BitOverflow { requested: 1, available: 0 })
        ));
    }

    #[test]
    fn test_ref_overflow() {
        let mut builder = CellBuilder::new();
        for _ in 0..4 {
            builder.store_ref(Cell::empty()).unwrap();
        }
        assert_eq!(builder.store_ref(Cell::empty()).unwrap_err(), CellError::RefOverflow);
    }

    #[test]
    fn test_store_coins() {
        let mut builder = CellBuilder::new();
        builder.store_coins(0).unwrap();
        assert_eq!(builder.bit_len(), 4);

        let mut builder = CellBuilder::new();
        builder.store_coins(50_000_000).unwrap();
        // 50_000_000 = 0x02FAF080, four bytes
        assert_eq!(builder.bit_len(), 4 + 32);
        assert_eq!(builder.end_cell().data(), &[0x40, 0x2f, 0xaf, 0x08, 0x00]);
    }

    #[test]
    fn test_store_address_width() {
        let mut builder = CellBuilder::new();
        builder
            .store_address(Some(&Address::new(-1, [0xaa; 32])))
            .unwrap();
        assert_eq!(builder.bit_len(), 267);

        let mut builder = CellBuilder::new();
        builder.store_address(None).unwrap();
        assert_eq!(builder.bit_len(), 2);
    }

    #[test]
    fn test_short_string_tail_single_cell() {
        let mut builder = CellBuilder::new();
        builder.store_string_tail("Hello World!").unwrap();
        let cell = builder.end_cell();
        assert_eq!(cell.bit_len(), 96);
        assert!(cell.refs().is_empty());
        assert_eq!(cell.data(), b"Hello World!");
    }

    #[test]
    fn test_long_string_tail_snakes() {
        let text = "a".repeat(300);
        let mut builder = CellBuilder::new();
        builder.store_string_tail(&text).unwrap();
        let cell = builder.end_cell();
        assert_eq!(cell.bit_len(), 127 * 8);
        assert_eq!(cell.refs().len(), 1);
        let second = &cell.refs()[0];
        assert_eq!(second.bit_len(), 127 * 8);
        let third = &second.refs()[0];
        assert_eq!(third.bit_len(), 46 * 8);
        assert!(third.refs().is_empty());
    }

    #[test]
    fn test_string_tail_needs_ref_slot() {
        let mut builder = CellBuilder::new();
        for _ in 0..4 {
            builder.store_ref(Cell::empty()).unwrap();
        }
        assert!(builder.store_string_tail(&"b".repeat(200)).is_err());
    }

    #[test]
    fn test_string_tail_depth_limit() {
        let per_cell = MAX_CELL_BITS / 8;
        let max_depth = usize::from(MAX_CELL_DEPTH);

        let longest = "a".repeat(per_cell * (max_depth + 1));
        let mut builder = CellBuilder::new();
        builder.store_string_tail(&longest).unwrap();
        let cell = builder.end_cell();
        assert_eq!(cell.depth(), MAX_CELL_DEPTH);
        assert_eq!(cell.begin_parse().load_string_tail().unwrap(), longest);

        let too_long = "a".repeat(per_cell * (max_depth + 1) + 1);
        let mut builder = CellBuilder::new();
        assert_eq!(
            builder.store_string_tail(&too_long).unwrap_err(),
            CellError::DepthOverflow { depth: max_depth + 1 }
        );
    }

    #[test]
    fn test_store_ref_rejects_deep_child() {
        let mut deepest = Cell::empty();
        for _ in 0..MAX_CELL_DEPTH {
            let mut builder = CellBuilder::new();
            builder.store_ref(deepest).unwrap();
            deepest = builder.end_cell();
        }
        let mut builder = CellBuilder::new();
        assert!(matches!(
            builder.store_ref(deepest),
            Err(CellError::DepthOverflow { depth: 1025 })
        ));
    }
}
