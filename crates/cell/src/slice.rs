//! Sequential reader over a cell.

use crate::cell::Cell;
use crate::error::{CellError, CellResult};
use ton_primitives::{Address, PrimitiveError};

/// Reads the bits and references of a cell front to back.
#[derive(Debug, Clone)]
pub struct CellSlice {
    cell: Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl CellSlice {
    pub(crate) fn new(cell: Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    /// Unread bits.
    #[inline]
    #[must_use]
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    /// Unread references.
    #[inline]
    #[must_use]
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs().len() - self.ref_pos
    }

    fn ensure_bits(&self, bits: usize) -> CellResult<()> {
        if bits > self.remaining_bits() {
            return Err(CellError::underflow(bits, self.remaining_bits()));
        }
        Ok(())
    }

    fn bit_at(&self, pos: usize) -> bool {
        self.cell.data()[pos / 8] & (0x80 >> (pos % 8)) != 0
    }

    /// Reads one bit.
    pub fn load_bit(&mut self) -> CellResult<bool> {
        self.ensure_bits(1)?;
        let bit = self.bit_at(self.bit_pos);
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Skips `bits` bits.
    pub fn skip(&mut self, bits: usize) -> CellResult<&mut Self> {
        self.ensure_bits(bits)?;
        self.bit_pos += bits;
        Ok(self)
    }

    /// Reads an unsigned integer of `bits` width (at most 128).
    pub fn load_uint(&mut self, bits: usize) -> CellResult<u128> {
        if bits > 128 {
            return Err(CellError::ValueOutOfRange {
                value: "uint".to_string(),
                bits,
            });
        }
        self.ensure_bits(bits)?;
        let mut value = 0u128;
        for _ in 0..bits {
            value = (value << 1) | self.bit_at(self.bit_pos) as u128;
            self.bit_pos += 1;
        }
        Ok(value)
    }

    /// Reads a two's complement signed integer of `bits` width (at most 128).
    pub fn load_int(&mut self, bits: usize) -> CellResult<i128> {
        let raw = self.load_uint(bits)?;
        if bits == 0 || bits == 128 {
            return Ok(raw as i128);
        }
        if raw >> (bits - 1) & 1 == 1 {
            Ok((raw | (u128::MAX << bits)) as i128)
        } else {
            Ok(raw as i128)
        }
    }

    /// Reads `bit_len` bits into a left-aligned buffer.
    pub fn load_bits(&mut self, bit_len: usize) -> CellResult<Vec<u8>> {
        self.ensure_bits(bit_len)?;
        let mut out = vec![0u8; bit_len.div_ceil(8)];
        if self.bit_pos % 8 == 0 {
            let start = self.bit_pos / 8;
            let len = out.len();
            out.copy_from_slice(&self.cell.data()[start..start + len]);
            if bit_len % 8 != 0 {
                let last = out.len() - 1;
                out[last] &= 0xffu8 << (8 - bit_len % 8);
            }
        } else {
            for i in 0..bit_len {
                if self.bit_at(self.bit_pos + i) {
                    out[i / 8] |= 0x80 >> (i % 8);
                }
            }
        }
        self.bit_pos += bit_len;
        Ok(out)
    }

    /// Reads `len` whole bytes.
    pub fn load_bytes(&mut self, len: usize) -> CellResult<Vec<u8>> {
        self.load_bits(len * 8)
    }

    /// Reads a `VarUInteger 16` amount.
    pub fn load_coins(&mut self) -> CellResult<u128> {
        let len = self.load_uint(4)? as usize;
        self.load_uint(len * 8)
    }

    /// Reads a `MsgAddress`; `None` for `addr_none`.
    ///
    /// Only `addr_std` without anycast is supported among the other forms.
    pub fn load_address(&mut self) -> CellResult<Option<Address>> {
        match self.load_uint(2)? {
            0b00 => Ok(None),
            0b10 => {
                if self.load_bit()? {
                    return Err(CellError::Address(PrimitiveError::invalid_address(
                        "anycast addresses are not supported",
                    )));
                }
                let workchain = self.load_int(8)? as i8;
                let bytes = self.load_bytes(32)?;
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&bytes);
                Ok(Some(Address::new(workchain, hash)))
            }
            tag => Err(CellError::Address(PrimitiveError::invalid_address(format!(
                "unsupported address tag {tag:#04b}"
            )))),
        }
    }

    /// Reads the next reference.
    pub fn load_ref(&mut self) -> CellResult<Cell> {
        let cell = self
            .cell
            .refs()
            .get(self.ref_pos)
            .cloned()
            .ok_or(CellError::RefUnderflow)?;
        self.ref_pos += 1;
        Ok(cell)
    }

    /// Reads a `Maybe ^Cell`.
    pub fn load_maybe_ref(&mut self) -> CellResult<Option<Cell>> {
        if self.load_bit()? {
            self.load_ref().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads the rest of the slice as a snake-encoded UTF-8 string.
    ///
    /// Each cell in the chain contributes whole bytes and at most one
    /// reference to the next part.
    pub fn load_string_tail(&mut self) -> CellResult<String> {
        let bytes = self.load_snake_bytes()?;
        String::from_utf8(bytes).map_err(|e| CellError::invalid_string(e.to_string()))
    }

    fn load_snake_bytes(&mut self) -> CellResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut current = self.clone();
        loop {
            if current.remaining_bits() % 8 != 0 {
                return Err(CellError::invalid_string(format!(
                    "{} bits are not whole bytes",
                    current.remaining_bits()
                )));
            }
            out.extend(current.load_bytes(current.remaining_bits() / 8)?);
            match current.remaining_refs() {
                0 => break,
                1 => current = current.load_ref()?.begin_parse(),
                n => {
                    return Err(CellError::invalid_string(format!(
                        "{n} references, expected at most one"
                    )))
                }
            }
        }
        self.bit_pos = self.cell.bit_len();
        self.ref_pos = self.cell.refs().len();
        Ok(out)
    }

    /// Reads a string tail stored in the next reference.
    pub fn load_string_ref_tail(&mut self) -> CellResult<String> {
        self.load_ref()?.begin_parse().load_string_tail()
    }

    /// Unread bits as a left-aligned buffer and their count.
    #[must_use]
    pub fn remaining_data(&self) -> (Vec<u8>, usize) {
        let bits = self.remaining_bits();
        let mut probe = self.clone();
        match probe.load_bits(bits) {
            Ok(data) => (data, bits),
            Err(_) => (Vec::new(), 0),
        }
    }

    /// Unread references.
    #[must_use]
    pub fn remaining_ref_cells(&self) -> Vec<Cell> {
        self.cell.refs()[self.ref_pos..].to_vec()
    }

    /// Fails unless everything has been read.
    pub fn end_parse(&self) -> CellResult<()> {
        if self.remaining_bits() != 0 || self.remaining_refs() != 0 {
            return Err(CellError::NotConsumed {
                bits: self.remaining_bits(),
                refs: self.remaining_refs(),
            });
        }
        Ok(())
    }
}
