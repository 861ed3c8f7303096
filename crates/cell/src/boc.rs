//! Bag-of-cells serialization.
//!
//! Layout (big-endian unless noted):
//!
//! ```text
//! magic(4) flags|size_bytes(1) off_bytes(1)
//! cells(size) roots(size) absent(size) total_cells_size(off)
//! root_index(size)* [index(off)*] cell_data [crc32c(4, LE)]
//! ```
//!
//! Cells are stored parents first, so every reference points forward.

use crate::cell::{Cell, CellHash, MAX_CELL_REFS};
use crate::error::{CellError, CellResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::{HashMap, HashSet};
use ton_primitives::checksum::crc32c;
use tracing::trace;

/// Generic bag-of-cells magic.
pub const BOC_MAGIC: u32 = 0xb5ee_9c72;

const FLAG_HAS_INDEX: u8 = 0x80;
const FLAG_HAS_CRC32C: u8 = 0x40;
const SIZE_BYTES_MASK: u8 = 0x07;

const DESCRIPTOR_REFS_MASK: u8 = 0x07;
const DESCRIPTOR_EXOTIC: u8 = 0x08;
const DESCRIPTOR_WITH_HASHES: u8 = 0x10;

/// Descriptor bytes of the smallest possible cell.
const MIN_CELL_BYTES: usize = 2;

impl Cell {
    /// Serializes the tree rooted at this cell without index or checksum.
    #[must_use]
    pub fn to_boc(&self) -> Vec<u8> {
        serialize(self, false)
    }

    /// Serializes the tree rooted at this cell with a CRC32C trailer.
    #[must_use]
    pub fn to_boc_with_crc(&self) -> Vec<u8> {
        serialize(self, true)
    }

    /// Base64 encoding of [`Cell::to_boc`].
    #[must_use]
    pub fn to_boc_base64(&self) -> String {
        STANDARD.encode(self.to_boc())
    }

    /// Hex encoding of [`Cell::to_boc`].
    #[must_use]
    pub fn to_boc_hex(&self) -> String {
        hex::encode(self.to_boc())
    }

    /// Parses a bag of cells with exactly one root.
    pub fn from_boc(bytes: &[u8]) -> CellResult<Cell> {
        let mut roots = deserialize(bytes)?;
        if roots.len() != 1 {
            return Err(CellError::invalid_boc(format!(
                "expected one root, found {}",
                roots.len()
            )));
        }
        Ok(roots.remove(0))
    }

    /// Parses a base64-encoded bag of cells with one root.
    pub fn from_boc_base64(text: &str) -> CellResult<Cell> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| CellError::invalid_boc(format!("bad base64: {e}")))?;
        Self::from_boc(&bytes)
    }

    /// Parses a hex-encoded bag of cells with one root.
    pub fn from_boc_hex(text: &str) -> CellResult<Cell> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| CellError::invalid_boc(format!("bad hex: {e}")))?;
        Self::from_boc(&bytes)
    }
}

/// Unique cells of the tree, parents before children.
fn topological_order(root: &Cell) -> Vec<Cell> {
    let mut seen = HashSet::new();
    let mut post_order = Vec::new();
    let mut stack = vec![(root.clone(), 0usize)];
    seen.insert(*root.hash());

    while let Some((cell, next)) = stack.last_mut() {
        let child = cell.refs().get(*next).cloned();
        *next += 1;
        match child {
            Some(child) => {
                if seen.insert(*child.hash()) {
                    stack.push((child, 0));
                }
            }
            None => {
                if let Some((done, _)) = stack.pop() {
                    post_order.push(done);
                }
            }
        }
    }

    post_order.reverse();
    post_order
}

fn bytes_needed(value: usize) -> usize {
    let bits = usize::BITS as usize - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

fn write_uint(out: &mut Vec<u8>, value: usize, bytes: usize) {
    let be = (value as u64).to_be_bytes();
    out.extend_from_slice(&be[8 - bytes..]);
}

fn serialize(root: &Cell, with_crc: bool) -> Vec<u8> {
    let cells = topological_order(root);
    let index: HashMap<CellHash, usize> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| (*cell.hash(), i))
        .collect();

    let size_bytes = bytes_needed(cells.len());

    let mut payload = Vec::new();
    for cell in &cells {
        payload.extend_from_slice(&cell.descriptors());
        payload.extend_from_slice(&cell.padded_data());
        for child in cell.refs() {
            write_uint(&mut payload, index[child.hash()], size_bytes);
        }
    }
    let off_bytes = bytes_needed(payload.len());

    let mut out = Vec::with_capacity(payload.len() + 32);
    out.extend_from_slice(&BOC_MAGIC.to_be_bytes());
    let mut flags = size_bytes as u8;
    if with_crc {
        flags |= FLAG_HAS_CRC32C;
    }
    out.push(flags);
    out.push(off_bytes as u8);
    write_uint(&mut out, cells.len(), size_bytes);
    write_uint(&mut out, 1, size_bytes);
    write_uint(&mut out, 0, size_bytes);
    write_uint(&mut out, payload.len(), off_bytes);
    write_uint(&mut out, 0, size_bytes);
    out.extend_from_slice(&payload);

    if with_crc {
        let crc = crc32c(&out);
        out.extend_from_slice(&crc.to_le_bytes());
    }

    trace!(cells = cells.len(), bytes = out.len(), "serialized bag of cells");
    out
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> CellResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| CellError::invalid_boc("unexpected end of data"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> CellResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_uint(&mut self, len: usize) -> CellResult<usize> {
        Ok(self
            .take(len)?
            .iter()
            .fold(0usize, |acc, byte| (acc << 8) | *byte as usize))
    }
}

struct RawCell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<usize>,
}

fn deserialize(bytes: &[u8]) -> CellResult<Vec<Cell>> {
    let mut reader = Reader { bytes, pos: 0 };

    let magic = u32::from_be_bytes(
        reader
            .take(4)?
            .try_into()
            .map_err(|_| CellError::invalid_boc("short magic"))?,
    );
    if magic != BOC_MAGIC {
        return Err(CellError::invalid_boc(format!("unknown magic {magic:#010x}")));
    }

    let flags = reader.read_u8()?;
    let has_index = flags & FLAG_HAS_INDEX != 0;
    let has_crc = flags & FLAG_HAS_CRC32C != 0;
    let size_bytes = (flags & SIZE_BYTES_MASK) as usize;
    if size_bytes == 0 || size_bytes > 4 {
        return Err(CellError::invalid_boc(format!("size_bytes {size_bytes}")));
    }
    let off_bytes = reader.read_u8()? as usize;
    if off_bytes == 0 || off_bytes > 8 {
        return Err(CellError::invalid_boc(format!("off_bytes {off_bytes}")));
    }

    if has_crc {
        if bytes.len() < 4 {
            return Err(CellError::invalid_boc("missing checksum"));
        }
        let (body, trailer) = bytes.split_at(bytes.len() - 4);
        let found = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let expected = crc32c(body);
        if expected != found {
            return Err(CellError::ChecksumMismatch { expected, found });
        }
    }

    let cell_count = reader.read_uint(size_bytes)?;
    let root_count = reader.read_uint(size_bytes)?;
    let absent = reader.read_uint(size_bytes)?;
    let _total_size = reader.read_uint(off_bytes)?;
    if absent != 0 {
        return Err(CellError::unsupported("absent cells"));
    }
    if root_count == 0 || root_count > cell_count {
        return Err(CellError::invalid_boc(format!(
            "{root_count} roots for {cell_count} cells"
        )));
    }

    let trailer = if has_crc { 4 } else { 0 };
    let available = bytes.len().saturating_sub(reader.pos + trailer);
    let index_bytes = if has_index { off_bytes } else { 0 };
    let needed = root_count
        .checked_mul(size_bytes)
        .zip(cell_count.checked_mul(MIN_CELL_BYTES + index_bytes))
        .and_then(|(roots, cells)| roots.checked_add(cells));
    if needed.map_or(true, |needed| needed > available) {
        return Err(CellError::invalid_boc(format!(
            "{cell_count} cells and {root_count} roots do not fit in {available} bytes"
        )));
    }

    let mut root_indexes = Vec::with_capacity(root_count);
    for _ in 0..root_count {
        root_indexes.push(reader.read_uint(size_bytes)?);
    }
    if has_index {
        reader.take(cell_count * off_bytes)?;
    }

    let mut raw_cells = Vec::with_capacity(cell_count);
    for i in 0..cell_count {
        let d1 = reader.read_u8()?;
        let d2 = reader.read_u8()?;
        let ref_count = (d1 & DESCRIPTOR_REFS_MASK) as usize;
        if d1 & DESCRIPTOR_EXOTIC != 0 || d1 >> 5 != 0 {
            return Err(CellError::unsupported(format!("exotic or leveled cell at {i}")));
        }
        if d1 & DESCRIPTOR_WITH_HASHES != 0 {
            return Err(CellError::unsupported(format!("stored hashes at {i}")));
        }
        if ref_count > MAX_CELL_REFS {
            return Err(CellError::invalid_boc(format!("{ref_count} refs at {i}")));
        }

        let data_len = (d2 as usize).div_ceil(2);
        let mut data = reader.take(data_len)?.to_vec();
        let bit_len = if d2 % 2 == 0 {
            data_len * 8
        } else {
            let last = *data
                .last()
                .ok_or_else(|| CellError::invalid_boc(format!("empty padded data at {i}")))?;
            if last == 0 {
                return Err(CellError::invalid_boc(format!("missing completion tag at {i}")));
            }
            let unused = last.trailing_zeros() as usize + 1;
            let len = data_len * 8 - unused;
            data.truncate(len.div_ceil(8));
            len
        };

        let mut refs = Vec::with_capacity(ref_count);
        for _ in 0..ref_count {
            let target = reader.read_uint(size_bytes)?;
            if target <= i || target >= cell_count {
                return Err(CellError::invalid_boc(format!(
                    "cell {i} references {target}"
                )));
            }
            refs.push(target);
        }
        raw_cells.push(RawCell {
            data,
            bit_len,
            refs,
        });
    }

    let mut built: Vec<Option<Cell>> = vec![None; cell_count];
    for i in (0..cell_count).rev() {
        let raw = &raw_cells[i];
        let refs = raw
            .refs
            .iter()
            .map(|&target| {
                built[target]
                    .clone()
                    .ok_or_else(|| CellError::invalid_boc(format!("unresolved cell {target}")))
            })
            .collect::<CellResult<Vec<_>>>()?;
        built[i] = Some(Cell::new(raw.data.clone(), raw.bit_len, refs)?);
    }

    root_indexes
        .into_iter()
        .map(|index| {
            built
                .get(index)
                .cloned()
                .flatten()
                .ok_or_else(|| CellError::invalid_boc(format!("root index {index}")))
        })
        .collect()
}
