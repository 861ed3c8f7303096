//! Wire models for the Toncenter JSON-RPC API.

mod rpc_request;
mod rpc_response;
mod rpc_run_get_method;
pub mod stack;

pub use rpc_request::RpcRequest;
pub use rpc_response::RpcResponse;
pub use rpc_run_get_method::RpcRunGetMethodResult;
