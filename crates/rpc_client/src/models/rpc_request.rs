use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC request. Toncenter takes named parameters as an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Request ID
    pub id: u64,

    /// JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub json_rpc: String,

    /// Method name
    pub method: String,

    /// Named parameters
    pub params: Value,
}

impl RpcRequest {
    /// Creates a new RPC request
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            json_rpc: "2.0".to_string(),
            method: method.into(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize() {
        let request = RpcRequest::new(1, "sendBoc", json!({ "boc": "te6c" }));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "id": 1,
                "jsonrpc": "2.0",
                "method": "sendBoc",
                "params": { "boc": "te6c" }
            })
        );
    }
}
