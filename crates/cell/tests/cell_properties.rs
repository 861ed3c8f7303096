//! Property-based tests for cells.
//!
//! - snake strings read back unchanged, however many cells they span
//! - bags of cells preserve the root hash

use proptest::prelude::*;
use ton_cell::{Cell, CellBuilder};

fn string_cell(text: &str) -> Cell {
    let mut builder = CellBuilder::new();
    builder.store_string_tail(text).unwrap();
    builder.end_cell()
}

proptest! {
    #[test]
    fn test_string_tail_roundtrip(text in "\\PC{0,600}") {
        let cell = string_cell(&text);
        prop_assert_eq!(cell.begin_parse().load_string_tail().unwrap(), text);
    }

    #[test]
    fn test_string_cell_hash_deterministic(text in "\\PC{0,200}") {
        let first = string_cell(&text);
        let second = string_cell(&text);
        prop_assert_eq!(first.hash(), second.hash());
    }

    #[test]
    fn test_boc_roundtrip_preserves_hash(text in "\\PC{0,600}", with_crc in any::<bool>()) {
        let mut builder = CellBuilder::new();
        builder.store_uint(7, 5).unwrap();
        builder.store_string_ref_tail(&text).unwrap();
        builder.store_ref(string_cell(&text)).unwrap();
        let root = builder.end_cell();

        let boc = if with_crc { root.to_boc_with_crc() } else { root.to_boc() };
        let back = Cell::from_boc(&boc).unwrap();
        prop_assert_eq!(back.hash(), root.hash());
        prop_assert_eq!(back.depth(), root.depth());
    }

    #[test]
    fn test_uint_roundtrip(value in any::<u64>(), extra in 0usize..64) {
        let bits = 64 + extra;
        let mut builder = CellBuilder::new();
        builder.store_uint(value as u128, bits).unwrap();
        let mut slice = builder.end_cell().begin_parse();
        prop_assert_eq!(slice.load_uint(bits).unwrap(), value as u128);
    }
}

#[test]
fn test_greeting_cell_hash_vector() {
    let cell = string_cell("Hello World!");
    assert_eq!(cell.bit_len(), 96);
    assert_eq!(
        cell.hash_hex(),
        "8cced63e5433dd4af4c42d3bcabfb45f1b11141228f42747bcfa5f1021ec2b29"
    );
    assert_eq!(Cell::from_boc(&cell.to_boc()).unwrap(), cell);
}

#[test]
fn test_single_ref_storage_hash_vector() {
    let mut builder = CellBuilder::new();
    builder.store_ref(string_cell("Hello World!")).unwrap();
    assert_eq!(
        builder.end_cell().hash_hex(),
        "e05a79df2c2718d13b40f333012e5c231b172c854194f3c79ed875024a61239e"
    );
}
