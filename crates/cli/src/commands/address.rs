//! `address`: derive the deployment address offline.

use super::CommandResult;
use ton_cell::Cell;
use ton_contract::HelloWorld;

/// Formats the address `greeting` would deploy to.
pub fn address(code: Cell, greeting: &str, test_only: bool) -> CommandResult {
    let contract = HelloWorld::create_from_config(greeting, code)?;
    let address = contract.address();
    Ok(format!(
        "Raw:            {}\nBounceable:     {}\nNon-bounceable: {}",
        address.to_raw_string(),
        address.to_friendly(true, test_only, true),
        address.to_friendly(false, test_only, true),
    ))
}
