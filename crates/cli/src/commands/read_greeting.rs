//! `read-greeting`: run `getGreeting` on a deployed contract.

use super::CommandResult;
use ton_config::{ScriptConfig, DEFAULT_READ_ADDRESS};
use ton_contract::{ContractProvider, HelloWorld};
use ton_primitives::Address;
use tracing::{info, warn};

/// Reads the greeting stored at `address`.
pub async fn read_greeting(provider: &dyn ContractProvider, address: Address) -> CommandResult {
    info!(%address, "reading greeting");
    let contract = HelloWorld::create_from_address(address);
    let greeting = contract.get_greeting(provider).await?;
    Ok(format!("Greeting: {greeting}"))
}

/// Warns when the read address is still the built-in one, which points at
/// a fixed testnet deployment rather than the caller's own.
pub fn warn_if_default(config: &ScriptConfig) {
    if config.contract.read_address == DEFAULT_READ_ADDRESS {
        warn!(
            address = DEFAULT_READ_ADDRESS,
            "no address given, reading the built-in default; pass --address to read your own deployment"
        );
    }
}
