//! Command implementations.

pub mod address;
pub mod deploy;
pub mod read_greeting;

use crate::args::{Cli, Command};
use anyhow::Context;
use std::sync::Arc;
use ton_cell::Cell;
use ton_config::ScriptConfig;
use ton_contract::{CompiledArtifact, ContractProvider};
use ton_rpc_client::RpcClient;
use ton_wallets::{KeyPair, WalletV4};
use tracing::debug;

/// Output of a command, printed by `main`.
pub type CommandResult = anyhow::Result<String>;

/// Loads the contract code from the configured build artifact.
pub fn load_code(config: &ScriptConfig) -> anyhow::Result<Cell> {
    let path = config.artifact_path();
    CompiledArtifact::load_code(&path)
        .with_context(|| format!("loading compiled contract from {}", path.display()))
}

/// Builds the RPC client for the configured endpoint.
pub fn rpc_client(config: &ScriptConfig) -> anyhow::Result<RpcClient> {
    let endpoint = config.endpoint()?;
    debug!(%endpoint, "connecting");
    RpcClient::new(endpoint, config.network.api_key.clone(), config.timeout())
        .context("creating RPC client")
}

/// Builds the deployer wallet from the configured address and secret.
pub fn wallet(
    config: &ScriptConfig,
    provider: Arc<dyn ContractProvider>,
) -> anyhow::Result<WalletV4> {
    let address = config.wallet_address()?;
    let key_pair = KeyPair::from_secret_hex(config.wallet_secret()?)?;
    Ok(WalletV4::new(provider, address, key_pair))
}

/// Runs the parsed command against the live network.
pub async fn execute(cli: &Cli, config: &ScriptConfig) -> CommandResult {
    match &cli.command {
        Command::Deploy(_) => {
            let code = load_code(config)?;
            let provider: Arc<dyn ContractProvider> = Arc::new(rpc_client(config)?);
            let sender = wallet(config, provider.clone())?;
            deploy::deploy(
                provider.as_ref(),
                &sender,
                code,
                &config.contract.greeting,
                config.deploy_value()?,
            )
            .await
        }
        Command::ReadGreeting(args) => {
            if args.address.is_none() {
                read_greeting::warn_if_default(config);
            }
            let provider = rpc_client(config)?;
            read_greeting::read_greeting(&provider, config.read_address()?).await
        }
        Command::Address(_) => {
            let code = load_code(config)?;
            address::address(
                code,
                &config.contract.greeting,
                config.network.network_type.is_test_only(),
            )
        }
    }
}
