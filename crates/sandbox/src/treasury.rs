//! Pre-funded sender accounts.

use crate::blockchain::Blockchain;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use ton_contract::{ContractResult, Sender, SenderArguments};
use ton_primitives::{Address, Coins, BASECHAIN};

/// Initial balance of every treasury: one million TON.
pub const TREASURY_BALANCE: Coins = Coins::from_nano(1_000_000 * 1_000_000_000);

/// A named account that can pay for any message.
#[derive(Clone)]
pub struct Treasury {
    chain: Blockchain,
    address: Address,
}

impl Treasury {
    pub(crate) fn new(chain: Blockchain, name: &str) -> Self {
        let hash: [u8; 32] = Sha256::digest(format!("treasury:{name}").as_bytes()).into();
        Self {
            chain,
            address: Address::new(BASECHAIN, hash),
        }
    }

    /// Address of the treasury account.
    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl Sender for Treasury {
    fn address(&self) -> Option<Address> {
        Some(self.address)
    }

    async fn send(&self, args: SenderArguments) -> ContractResult<()> {
        self.chain.deliver_internal(self.address, args)
    }
}

impl std::fmt::Debug for Treasury {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Treasury")
            .field("address", &self.address)
            .finish()
    }
}
