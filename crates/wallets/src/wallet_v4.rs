//! Wallet v4 sender.
//!
//! Outgoing internal messages are wrapped in a signed external message:
//!
//! ```text
//! signature:bits512 wallet_id:uint32 valid_until:uint32 seqno:uint32 op:uint8
//!     (send_mode:uint8 ^message)*
//! ```
//!
//! The signature covers the hash of everything after it.

use crate::key_pair::KeyPair;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use ton_cell::{Cell, CellBuilder};
use ton_contract::message::{external_message, internal_message};
use ton_contract::{ContractError, ContractProvider, ContractResult, Sender, SenderArguments};
use ton_primitives::Address;
use tracing::{debug, info};

/// Base subwallet id; the workchain is added to it.
pub const DEFAULT_WALLET_ID: u32 = 698_983_191;

/// How long a signed transfer stays valid.
pub const DEFAULT_VALID_FOR: Duration = Duration::from_secs(60);

const SEQNO_GETTER: &str = "seqno";
const OP_SIMPLE_SEND: u8 = 0;

/// A deployed v4 wallet that signs with `key_pair`.
#[derive(Clone)]
pub struct WalletV4 {
    provider: Arc<dyn ContractProvider>,
    address: Address,
    key_pair: KeyPair,
    wallet_id: u32,
    valid_for: Duration,
}

impl WalletV4 {
    /// Wallet at `address` using the default subwallet id for its workchain.
    pub fn new(provider: Arc<dyn ContractProvider>, address: Address, key_pair: KeyPair) -> Self {
        let wallet_id = DEFAULT_WALLET_ID.wrapping_add_signed(i32::from(address.workchain()));
        Self {
            provider,
            address,
            key_pair,
            wallet_id,
            valid_for: DEFAULT_VALID_FOR,
        }
    }

    /// Overrides the subwallet id.
    #[must_use]
    pub fn with_wallet_id(mut self, wallet_id: u32) -> Self {
        self.wallet_id = wallet_id;
        self
    }

    /// Overrides how long transfers stay valid.
    #[must_use]
    pub fn with_valid_for(mut self, valid_for: Duration) -> Self {
        self.valid_for = valid_for;
        self
    }

    /// Wallet address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Subwallet id.
    pub fn wallet_id(&self) -> u32 {
        self.wallet_id
    }

    /// Public key of the signer.
    pub fn public_key(&self) -> [u8; 32] {
        self.key_pair.public_key()
    }

    /// Current sequence number as reported by the wallet contract.
    pub async fn seqno(&self) -> ContractResult<u32> {
        let mut stack = self
            .provider
            .run_get_method(&self.address, SEQNO_GETTER, Vec::new())
            .await?;
        let seqno = stack.read_number()?;
        u32::try_from(seqno).map_err(|_| ContractError::StackType {
            expected: "uint32 seqno",
            found: seqno.to_string(),
        })
    }

    /// Builds the signed transfer body. `valid_until` is ignored for the
    /// first transfer, which must not expire.
    pub fn create_transfer(
        &self,
        seqno: u32,
        valid_until: u32,
        messages: &[SenderArguments],
    ) -> ContractResult<Cell> {
        let mut signing = CellBuilder::new();
        signing.store_uint(u128::from(self.wallet_id), 32)?;
        if seqno == 0 {
            signing.store_uint(u128::from(u32::MAX), 32)?;
        } else {
            signing.store_uint(u128::from(valid_until), 32)?;
        }
        signing
            .store_uint(u128::from(seqno), 32)?
            .store_uint(u128::from(OP_SIMPLE_SEND), 8)?;
        for message in messages {
            signing
                .store_uint(u128::from(message.send_mode.bits()), 8)?
                .store_ref(internal_message(None, message)?)?;
        }
        let signing = signing.end_cell();

        let signature = self.key_pair.sign(signing.hash());
        let mut body = CellBuilder::new();
        body.store_bytes(&signature)?
            .store_slice(&signing.begin_parse())?;
        Ok(body.end_cell())
    }

    fn valid_until(&self) -> ContractResult<u32> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ContractError::sender(format!("system clock before epoch: {e}")))?;
        u32::try_from((now + self.valid_for).as_secs())
            .map_err(|_| ContractError::sender("valid_until does not fit in 32 bits"))
    }
}

#[async_trait]
impl Sender for WalletV4 {
    fn address(&self) -> Option<Address> {
        Some(self.address)
    }

    async fn send(&self, args: SenderArguments) -> ContractResult<()> {
        let seqno = self.seqno().await?;
        let valid_until = self.valid_until()?;
        debug!(wallet = %self.address, seqno, valid_until, to = %args.to, "signing transfer");

        let body = self.create_transfer(seqno, valid_until, std::slice::from_ref(&args))?;
        let external = external_message(&self.address, None, body)?;
        self.provider.send_boc(external.to_boc()).await?;

        info!(wallet = %self.address, seqno, to = %args.to, value = %args.value, "transfer submitted");
        Ok(())
    }
}

impl std::fmt::Debug for WalletV4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletV4")
            .field("address", &self.address)
            .field("wallet_id", &self.wallet_id)
            .field("key_pair", &self.key_pair)
            .finish()
    }
}
