//! Conversion between getter stacks and their JSON form.
//!
//! Results arrive as `["num", "0x2a"]`, `["cell", {"bytes": <boc>}]`,
//! `["slice", ..]`, `["builder", ..]` or `["null"]`. Arguments are sent as
//! `["num", "42"]` or `["tvm.Cell", <boc>]` and friends.

use crate::rpc_exception::RpcException;
use num_bigint::BigInt;
use num_traits::Num;
use serde_json::{json, Value};
use ton_cell::Cell;
use ton_contract::TupleItem;

/// Decodes a result stack.
pub fn parse_stack(entries: &[Value]) -> Result<Vec<TupleItem>, RpcException> {
    entries.iter().map(parse_stack_entry).collect()
}

/// Decodes one result entry.
pub fn parse_stack_entry(entry: &Value) -> Result<TupleItem, RpcException> {
    let pair = entry
        .as_array()
        .ok_or_else(|| RpcException::internal(format!("Stack entry is not an array: {entry}")))?;
    let kind = pair
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| RpcException::internal(format!("Stack entry without type: {entry}")))?;
    let payload = pair.get(1);

    match kind {
        "null" => Ok(TupleItem::Null),
        "num" => {
            let text = payload
                .and_then(Value::as_str)
                .ok_or_else(|| RpcException::internal("Number entry without value"))?;
            parse_num(text).map(TupleItem::Int)
        }
        "cell" => cell_payload(payload).map(TupleItem::Cell),
        "slice" => cell_payload(payload).map(TupleItem::Slice),
        "builder" => cell_payload(payload).map(TupleItem::Builder),
        other => Err(RpcException::internal(format!(
            "Unsupported stack entry type: {other}"
        ))),
    }
}

/// Encodes a getter argument.
pub fn serialize_stack_entry(item: &TupleItem) -> Result<Value, RpcException> {
    match item {
        TupleItem::Int(value) => Ok(json!(["num", value.to_string()])),
        TupleItem::Cell(cell) => Ok(json!(["tvm.Cell", encode_cell(cell)])),
        TupleItem::Slice(cell) => Ok(json!(["tvm.Slice", encode_cell(cell)])),
        TupleItem::Builder(cell) => Ok(json!(["tvm.Builder", encode_cell(cell)])),
        TupleItem::Null => Err(RpcException::internal(
            "Null getter arguments are not supported",
        )),
    }
}

fn encode_cell(cell: &Cell) -> String {
    cell.to_boc_base64()
}

fn parse_num(text: &str) -> Result<BigInt, RpcException> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = match digits.strip_prefix("0x") {
        Some(hex) => BigInt::from_str_radix(hex, 16),
        None => BigInt::from_str_radix(digits, 10),
    }
    .map_err(|e| RpcException::internal(format!("Invalid number {text}: {e}")))?;
    Ok(if negative { -value } else { value })
}

fn cell_payload(payload: Option<&Value>) -> Result<Cell, RpcException> {
    let bytes = payload
        .and_then(|value| value.get("bytes").or(Some(value)))
        .and_then(Value::as_str)
        .ok_or_else(|| RpcException::internal("Cell entry without bytes"))?;
    Cell::from_boc_base64(bytes)
        .map_err(|e| RpcException::internal(format!("Invalid cell in stack: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ton_cell::CellBuilder;

    #[test]
    fn test_parse_numbers() {
        let items = parse_stack(&[json!(["num", "0x2a"]), json!(["num", "-0x1"]), json!(["num", "7"])])
            .unwrap();
        assert_eq!(
            items,
            vec![
                TupleItem::Int(BigInt::from(42)),
                TupleItem::Int(BigInt::from(-1)),
                TupleItem::Int(BigInt::from(7)),
            ]
        );
    }

    #[test]
    fn test_parse_cell() {
        let mut builder = CellBuilder::new();
        builder.store_string_tail("Hello World!").unwrap();
        let cell = builder.end_cell();
        let entry = json!(["cell", { "bytes": cell.to_boc_base64(), "object": {} }]);
        assert_eq!(parse_stack_entry(&entry).unwrap(), TupleItem::Cell(cell));
    }

    #[test]
    fn test_parse_rejects_tuples() {
        assert!(parse_stack_entry(&json!(["tuple", { "elements": [] }])).is_err());
        assert!(parse_stack_entry(&json!("num")).is_err());
    }

    #[test]
    fn test_serialize_arguments() {
        assert_eq!(
            serialize_stack_entry(&TupleItem::Int(BigInt::from(-5))).unwrap(),
            json!(["num", "-5"])
        );
        let cell = Cell::empty();
        assert_eq!(
            serialize_stack_entry(&TupleItem::Cell(cell.clone())).unwrap(),
            json!(["tvm.Cell", cell.to_boc_base64()])
        );
        assert!(serialize_stack_entry(&TupleItem::Null).is_err());
    }
}
