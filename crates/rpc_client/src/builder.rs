use crate::rpc_client::RpcClient;
use crate::rpc_exception::RpcException;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default timeout for one HTTP round trip.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: &str = "X-API-Key";
const JSON_RPC_PATH: &str = "jsonRPC";

/// Configures and builds an [`RpcClient`].
#[derive(Debug, Clone)]
pub struct RpcClientBuilder {
    endpoint: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl RpcClientBuilder {
    /// Starts from an API base such as `https://toncenter.com/api/v2`.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            api_key: None,
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// Sends `X-API-Key` with every request.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key if one is given.
    #[must_use]
    pub fn with_optional_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<RpcClient, RpcException> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| RpcException::internal(format!("Invalid API key: {e}")))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| RpcException::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(RpcClient::with_client(
            http_client,
            json_rpc_url(&self.endpoint)?,
        ))
    }
}

/// Appends `/jsonRPC` to an API base unless it is already there.
fn json_rpc_url(endpoint: &Url) -> Result<Url, RpcException> {
    let base = endpoint.as_str().trim_end_matches('/');
    if base.ends_with(JSON_RPC_PATH) {
        return Ok(endpoint.clone());
    }
    Url::parse(&format!("{base}/{JSON_RPC_PATH}"))
        .map_err(|e| RpcException::internal(format!("Invalid endpoint {endpoint}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rpc_url() {
        let cases = [
            ("https://toncenter.com/api/v2", "https://toncenter.com/api/v2/jsonRPC"),
            ("https://toncenter.com/api/v2/", "https://toncenter.com/api/v2/jsonRPC"),
            (
                "https://testnet.toncenter.com/api/v2/jsonRPC",
                "https://testnet.toncenter.com/api/v2/jsonRPC",
            ),
        ];
        for (input, expected) in cases {
            let url = json_rpc_url(&Url::parse(input).unwrap()).unwrap();
            assert_eq!(url.as_str(), expected);
        }
    }

    #[test]
    fn test_rejects_bad_api_key() {
        let result = RpcClientBuilder::new(Url::parse("http://localhost").unwrap())
            .api_key("bad\nkey")
            .build();
        assert!(result.is_err());
    }
}
