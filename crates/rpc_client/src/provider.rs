//! [`ContractProvider`] over JSON-RPC.

use crate::rpc_client::RpcClient;
use async_trait::async_trait;
use ton_contract::{
    AccountState, ContractError, ContractProvider, ContractResult, TupleItem, TupleReader,
};
use ton_primitives::Address;
use tracing::{info, warn};

#[async_trait]
impl ContractProvider for RpcClient {
    async fn get_state(&self, address: &Address) -> ContractResult<AccountState> {
        self.get_address_state(address)
            .await
            .map_err(ContractError::provider)
    }

    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: Vec<TupleItem>,
    ) -> ContractResult<TupleReader> {
        let result = RpcClient::run_get_method(self, address, method, &args)
            .await
            .map_err(ContractError::provider)?;
        if !result.is_success() {
            warn!(%address, method, exit_code = result.exit_code, "getter failed");
            return Err(ContractError::GetterFailed {
                method: method.to_string(),
                exit_code: result.exit_code,
            });
        }
        let items = result.items().map_err(ContractError::provider)?;
        Ok(TupleReader::new(items))
    }

    async fn send_boc(&self, boc: Vec<u8>) -> ContractResult<()> {
        RpcClient::send_boc(self, &boc)
            .await
            .map_err(ContractError::provider)?;
        info!(bytes = boc.len(), "external message accepted");
        Ok(())
    }
}
