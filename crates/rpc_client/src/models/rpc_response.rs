use crate::rpc_exception::{RpcException, INTERNAL_ERROR, PARSE_ERROR};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Toncenter response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Whether the call succeeded
    #[serde(default)]
    pub ok: bool,

    /// Method result, present when `ok`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error description, present when not `ok`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error code, usually the HTTP status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl RpcResponse {
    /// Parses a response body.
    pub fn from_json(content: &str) -> Result<Self, RpcException> {
        serde_json::from_str(content)
            .map_err(|e| RpcException::new(PARSE_ERROR, format!("Invalid response: {e}")))
    }

    /// Result value, or the node's error.
    pub fn into_result(self) -> Result<Value, RpcException> {
        if !self.ok {
            return Err(RpcException::new(
                self.code.unwrap_or(INTERNAL_ERROR),
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        self.result
            .ok_or_else(|| RpcException::internal("No result returned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let response = RpcResponse::from_json(r#"{"ok":true,"result":"active","id":1}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), Value::from("active"));
    }

    #[test]
    fn test_error_response() {
        let response = RpcResponse::from_json(
            r#"{"ok":false,"error":"LITE_SERVER_UNKNOWN: cannot apply external message","code":500}"#,
        )
        .unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code, 500);
        assert!(err.message.contains("cannot apply"));
    }

    #[test]
    fn test_malformed_response() {
        let err = RpcResponse::from_json("<html>").unwrap_err();
        assert_eq!(err.code, PARSE_ERROR);
    }
}
