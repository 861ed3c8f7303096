use super::stack::parse_stack;
use crate::rpc_exception::RpcException;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ton_contract::TupleItem;

/// Result of `runGetMethod`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRunGetMethodResult {
    /// Gas consumed by the getter
    #[serde(default)]
    pub gas_used: i64,

    /// Raw result stack entries
    #[serde(default)]
    pub stack: Vec<Value>,

    /// TVM exit code
    pub exit_code: i32,
}

impl RpcRunGetMethodResult {
    /// Creates from the `result` value.
    pub fn from_json(value: Value) -> Result<Self, RpcException> {
        serde_json::from_value(value)
            .map_err(|e| RpcException::internal(format!("Invalid runGetMethod result: {e}")))
    }

    /// 0 and 1 are the TVM success codes.
    pub fn is_success(&self) -> bool {
        matches!(self.exit_code, 0 | 1)
    }

    /// Decoded result stack.
    pub fn items(&self) -> Result<Vec<TupleItem>, RpcException> {
        parse_stack(&self.stack)
    }
}
