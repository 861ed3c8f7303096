//! `deploy`: create the contract from its greeting and send the deploy
//! message through a wallet.

use super::CommandResult;
use std::time::Duration;
use ton_cell::Cell;
use ton_contract::{
    wait_for_deploy_with, ContractProvider, HelloWorld, Sender, DEFAULT_DEPLOY_ATTEMPTS,
    DEFAULT_DEPLOY_INTERVAL,
};
use ton_primitives::Coins;
use tracing::info;

/// Deploys with the default polling schedule.
pub async fn deploy(
    provider: &dyn ContractProvider,
    via: &dyn Sender,
    code: Cell,
    greeting: &str,
    value: Coins,
) -> CommandResult {
    deploy_with(
        provider,
        via,
        code,
        greeting,
        value,
        DEFAULT_DEPLOY_ATTEMPTS,
        DEFAULT_DEPLOY_INTERVAL,
    )
    .await
}

/// Deploys and polls `attempts` times, `interval` apart, for activation.
pub async fn deploy_with(
    provider: &dyn ContractProvider,
    via: &dyn Sender,
    code: Cell,
    greeting: &str,
    value: Coins,
    attempts: u32,
    interval: Duration,
) -> CommandResult {
    let contract = HelloWorld::create_from_config(greeting, code)?;
    info!(address = %contract.address(), greeting, %value, "deploying");

    contract.send_deploy(provider, via, value).await?;
    wait_for_deploy_with(provider, contract.address(), attempts, interval).await?;

    Ok(format!("Deployed HelloWorld at {}", contract.address()))
}
