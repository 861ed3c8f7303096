//! Immutable cells and their representation hash.

use crate::error::{CellError, CellResult};
use crate::slice::CellSlice;
use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Maximum number of data bits in a cell.
pub const MAX_CELL_BITS: usize = 1023;

/// Maximum number of references in a cell.
pub const MAX_CELL_REFS: usize = 4;

/// Maximum depth of a cell tree accepted on-chain.
pub const MAX_CELL_DEPTH: u16 = 1024;

/// Representation hash of a cell.
pub type CellHash = [u8; 32];

/// An ordinary cell: up to 1023 bits and up to four child references.
///
/// Cells are cheap to clone; the payload is shared. The hash and depth are
/// computed once on construction. Equality compares hashes.
#[derive(Clone)]
pub struct Cell {
    inner: Arc<CellInner>,
}

struct CellInner {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
    hash: CellHash,
    depth: u16,
}

impl Cell {
    /// Creates a cell from raw bits and references.
    ///
    /// `data` holds the bits MSB first and must be exactly
    /// `ceil(bit_len / 8)` bytes long. Bits past `bit_len` are cleared.
    ///
    /// # Errors
    ///
    /// Fails when the bit, reference or depth limits are exceeded or the
    /// buffer length does not match `bit_len`.
    pub fn new(data: Vec<u8>, bit_len: usize, refs: Vec<Cell>) -> CellResult<Self> {
        if bit_len > MAX_CELL_BITS {
            return Err(CellError::BitOverflow {
                requested: bit_len,
                available: MAX_CELL_BITS,
            });
        }
        if refs.len() > MAX_CELL_REFS {
            return Err(CellError::RefOverflow);
        }
        for child in &refs {
            check_child_depth(child)?;
        }
        if data.len() != bit_len.div_ceil(8) {
            return Err(CellError::unsupported(format!(
                "{} data bytes for {} bits",
                data.len(),
                bit_len
            )));
        }
        Ok(Self::from_parts(data, bit_len, refs))
    }

    /// Limits must already hold.
    pub(crate) fn from_parts(mut data: Vec<u8>, bit_len: usize, refs: Vec<Cell>) -> Self {
        debug_assert!(bit_len <= MAX_CELL_BITS && refs.len() <= MAX_CELL_REFS);
        data.truncate(bit_len.div_ceil(8));
        if bit_len % 8 != 0 {
            if let Some(last) = data.last_mut() {
                *last &= 0xffu8 << (8 - bit_len % 8);
            }
        }

        let depth = refs
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0);

        let mut hasher = Sha256::new();
        hasher.update(descriptors(bit_len, refs.len()));
        hasher.update(padded_data(&data, bit_len));
        for child in &refs {
            hasher.update(child.depth().to_be_bytes());
        }
        for child in &refs {
            hasher.update(child.hash());
        }

        Self {
            inner: Arc::new(CellInner {
                data,
                bit_len,
                refs,
                hash: hasher.finalize().into(),
                depth,
            }),
        }
    }

    /// A cell with no bits and no references.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), 0, Vec::new())
    }

    /// Data bytes, MSB first; the last byte may be partially used.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Number of data bits.
    #[inline]
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.inner.bit_len
    }

    /// Child references.
    #[inline]
    #[must_use]
    pub fn refs(&self) -> &[Cell] {
        &self.inner.refs
    }

    /// Representation hash.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &CellHash {
        &self.inner.hash
    }

    /// Hex-encoded representation hash.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex::encode(self.inner.hash)
    }

    /// Depth of the tree below this cell.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.inner.depth
    }

    /// Returns `true` when the cell carries neither bits nor references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.bit_len == 0 && self.inner.refs.is_empty()
    }

    /// Opens the cell for reading.
    #[must_use]
    pub fn begin_parse(&self) -> CellSlice {
        CellSlice::new(self.clone())
    }

    /// The two descriptor bytes.
    #[must_use]
    pub fn descriptors(&self) -> [u8; 2] {
        descriptors(self.inner.bit_len, self.inner.refs.len())
    }

    /// Data with the completion tag appended when not byte aligned.
    #[must_use]
    pub fn padded_data(&self) -> Vec<u8> {
        padded_data(&self.inner.data, self.inner.bit_len)
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{:indent$}x{{", "", indent = indent)?;
        let bit_len = self.inner.bit_len;
        let mut text = hex::encode_upper(self.padded_data());
        text.truncate(bit_len.div_ceil(4));
        if bit_len % 4 != 0 {
            text.push('_');
        }
        write!(f, "{text}}}")?;
        for child in &self.inner.refs {
            writeln!(f)?;
            child.fmt_tree(f, indent + 1)?;
        }
        Ok(())
    }
}

/// A cell may only be referenced if its parent stays within [`MAX_CELL_DEPTH`].
pub(crate) fn check_child_depth(child: &Cell) -> CellResult<()> {
    if child.depth() >= MAX_CELL_DEPTH {
        return Err(CellError::DepthOverflow {
            depth: usize::from(child.depth()) + 1,
        });
    }
    Ok(())
}

fn descriptors(bit_len: usize, refs: usize) -> [u8; 2] {
    let d1 = refs as u8;
    let d2 = (bit_len / 8 + bit_len.div_ceil(8)) as u8;
    [d1, d2]
}

fn padded_data(data: &[u8], bit_len: usize) -> Vec<u8> {
    let mut padded = data.to_vec();
    if bit_len % 8 != 0 {
        let last = padded.len() - 1;
        padded[last] |= 0x80 >> (bit_len % 8);
    }
    padded
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.inner.hash == other.inner.hash
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("bits", &self.inner.bit_len)
            .field("refs", &self.inner.refs.len())
            .field("hash", &self.hash_hex())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_hash() {
        assert_eq!(
            Cell::empty().hash_hex(),
            "96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7"
        );
        assert_eq!(Cell::empty().depth(), 0);
    }

    #[test]
    fn test_limits() {
        assert!(Cell::new(vec![0; 128], 1024, vec![]).is_err());
        assert!(Cell::new(vec![], 0, vec![Cell::empty(); 5]).is_err());
        assert!(Cell::new(vec![0; 2], 8, vec![]).is_err());
    }

    #[test]
    fn test_unused_bits_cleared() {
        let a = Cell::new(vec![0b1010_1111], 4, vec![]).unwrap();
        let b = Cell::new(vec![0b1010_0000], 4, vec![]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.padded_data(), vec![0b1010_1000]);
        assert_eq!(a.descriptors(), [0, 1]);
    }

    #[test]
    fn test_depth() {
        let leaf = Cell::empty();
        let mid = Cell::new(vec![], 0, vec![leaf.clone()]).unwrap();
        let root = Cell::new(vec![], 0, vec![mid, leaf]).unwrap();
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let mut cell = Cell::empty();
        for _ in 0..MAX_CELL_DEPTH {
            cell = Cell::new(vec![], 0, vec![cell]).unwrap();
        }
        assert_eq!(cell.depth(), MAX_CELL_DEPTH);
        assert_eq!(
            Cell::new(vec![], 0, vec![cell]).unwrap_err(),
            CellError::DepthOverflow { depth: 1025 }
        );
    }

    #[test]
    fn test_display() {
        let cell = Cell::new(vec![0xab, 0xc0], 12, vec![Cell::empty()]).unwrap();
        assert_eq!(cell.to_string(), "x{ABC}\n x{}");
        let partial = Cell::new(vec![0b1000_0000], 1, vec![]).unwrap();
        assert_eq!(partial.to_string(), "x{C_}");
    }
}
