//! TON RPC Client Library
//!
//! A client for the Toncenter v2 JSON-RPC API. [`RpcClient`] implements
//! [`ton_contract::ContractProvider`], so contract wrappers can run getters
//! and submit messages over HTTP.

mod builder;
pub mod models;
mod provider;
mod rpc_client;
mod rpc_exception;

pub use builder::{RpcClientBuilder, DEFAULT_HTTP_TIMEOUT};
pub use models::{RpcRequest, RpcResponse, RpcRunGetMethodResult};
pub use rpc_client::RpcClient;
pub use rpc_exception::{RpcException, INTERNAL_ERROR, PARSE_ERROR};
