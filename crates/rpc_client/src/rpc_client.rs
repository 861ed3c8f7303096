use crate::builder::RpcClientBuilder;
use crate::models::stack::serialize_stack_entry;
use crate::models::{RpcRequest, RpcResponse, RpcRunGetMethodResult};
use crate::rpc_exception::RpcException;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use ton_contract::{AccountState, TupleItem};
use ton_primitives::{Address, Coins};
use tracing::{debug, trace};
use url::Url;

/// Client for the Toncenter v2 JSON-RPC endpoint.
#[derive(Debug)]
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a configurable builder for the RPC client.
    #[must_use]
    pub fn builder(endpoint: Url) -> RpcClientBuilder {
        RpcClientBuilder::new(endpoint)
    }

    /// Creates a client for `endpoint` with an optional API key.
    pub fn new(
        endpoint: Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RpcException> {
        RpcClientBuilder::new(endpoint)
            .with_optional_api_key(api_key)
            .timeout(timeout)
            .build()
    }

    /// Creates a client posting to `url` with an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    /// The JSON-RPC URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.base_address
    }

    fn as_rpc_request(&self, method: &str, params: Value) -> RpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RpcRequest::new(id, method, params)
    }

    /// Sends one request and parses the envelope.
    pub async fn send_async(&self, request: RpcRequest) -> Result<RpcResponse, RpcException> {
        debug!(method = %request.method, id = request.id, "rpc request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcException::internal(format!("HTTP error: {e}")))?;

        let status = response.status();
        let content = response
            .text()
            .await
            .map_err(|e| RpcException::internal(format!("Failed to read response: {e}")))?;
        trace!(%status, body = %content, "rpc response");

        RpcResponse::from_json(&content).map_err(|e| {
            if status.is_success() {
                e
            } else {
                RpcException::new(i32::from(status.as_u16()), format!("HTTP {status}: {content}"))
            }
        })
    }

    /// Sends a request and returns its result.
    pub async fn rpc_send_async(&self, method: &str, params: Value) -> Result<Value, RpcException> {
        let request = self.as_rpc_request(method, params);
        self.send_async(request).await?.into_result()
    }

    /// Runs a getter on the latest state of `address`.
    pub async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        stack: &[TupleItem],
    ) -> Result<RpcRunGetMethodResult, RpcException> {
        let stack = stack
            .iter()
            .map(serialize_stack_entry)
            .collect::<Result<Vec<_>, _>>()?;
        let result = self
            .rpc_send_async(
                "runGetMethod",
                json!({
                    "address": address.to_string(),
                    "method": method,
                    "stack": stack,
                }),
            )
            .await?;
        RpcRunGetMethodResult::from_json(result)
    }

    /// Lifecycle state of `address`.
    pub async fn get_address_state(&self, address: &Address) -> Result<AccountState, RpcException> {
        let result = self
            .rpc_send_async("getAddressState", json!({ "address": address.to_string() }))
            .await?;
        let state = token_as_str(&result, "getAddressState")?;
        state
            .parse()
            .map_err(|e: String| RpcException::internal(e))
    }

    /// Balance of `address`.
    pub async fn get_address_balance(&self, address: &Address) -> Result<Coins, RpcException> {
        let result = self
            .rpc_send_async("getAddressBalance", json!({ "address": address.to_string() }))
            .await?;
        let nano = match &result {
            Value::Number(number) => number.to_string(),
            other => token_as_str(other, "getAddressBalance")?.to_string(),
        };
        nano.parse::<u128>()
            .map(Coins::from_nano)
            .map_err(|e| RpcException::internal(format!("getAddressBalance: {e}")))
    }

    /// Broadcasts a serialized external message.
    pub async fn send_boc(&self, boc: &[u8]) -> Result<(), RpcException> {
        let encoded = general_purpose::STANDARD.encode(boc);
        self.rpc_send_async("sendBoc", json!({ "boc": encoded }))
            .await?;
        Ok(())
    }
}

fn token_as_str<'a>(token: &'a Value, context: &str) -> Result<&'a str, RpcException> {
    token
        .as_str()
        .ok_or_else(|| RpcException::internal(format!("{context}: expected string token")))
}
