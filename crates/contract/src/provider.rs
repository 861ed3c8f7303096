//! Provider and sender seams.
//!
//! A [`ContractProvider`] reaches the chain (over RPC or in memory); a
//! [`Sender`] turns [`SenderArguments`] into a signed delivery.

use crate::error::{ContractError, ContractResult};
use crate::message::{InternalMessage, SenderArguments};
use crate::state_init::StateInit;
use crate::tuple::{TupleItem, TupleReader};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use ton_primitives::Address;
use tracing::{debug, info};

/// Polls performed by [`wait_for_deploy`].
pub const DEFAULT_DEPLOY_ATTEMPTS: u32 = 10;

/// Delay between polls performed by [`wait_for_deploy`].
pub const DEFAULT_DEPLOY_INTERVAL: Duration = Duration::from_secs(2);

/// Lifecycle state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountState {
    /// Code and data are installed.
    Active,
    /// No code yet; may hold a balance.
    Uninitialized,
    /// Frozen for unpaid storage.
    Frozen,
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Frozen => write!(f, "frozen"),
        }
    }
}

impl std::str::FromStr for AccountState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "uninitialized" | "uninit" | "nonexist" => Ok(Self::Uninitialized),
            "frozen" => Ok(Self::Frozen),
            _ => Err(format!("Unknown account state: {s}")),
        }
    }
}

/// Read and submit access to the chain.
#[async_trait]
pub trait ContractProvider: Send + Sync {
    /// State of the account at `address`.
    async fn get_state(&self, address: &Address) -> ContractResult<AccountState>;

    /// Runs a getter and returns its stack.
    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: Vec<TupleItem>,
    ) -> ContractResult<TupleReader>;

    /// Submits a serialized external message.
    async fn send_boc(&self, boc: Vec<u8>) -> ContractResult<()>;

    /// Sends an internal message to `address` through `via`.
    ///
    /// `init` is attached only while the destination is not yet active.
    async fn internal(
        &self,
        via: &dyn Sender,
        address: &Address,
        init: Option<&StateInit>,
        message: InternalMessage,
    ) -> ContractResult<()> {
        let init = match init {
            Some(init) if self.get_state(address).await? != AccountState::Active => {
                Some(init.clone())
            }
            _ => None,
        };
        debug!(
            to = %address,
            value = %message.value,
            with_init = init.is_some(),
            "sending internal message"
        );

        via.send(SenderArguments {
            to: *address,
            value: message.value,
            bounce: message.bounce,
            send_mode: message.send_mode,
            init,
            body: message.body,
        })
        .await
    }
}

/// Delivers internal messages on behalf of an account.
#[async_trait]
pub trait Sender: Send + Sync {
    /// Address messages originate from, when known.
    fn address(&self) -> Option<Address>;

    /// Delivers one message.
    async fn send(&self, args: SenderArguments) -> ContractResult<()>;
}

/// Polls until `address` is active, using the default schedule.
pub async fn wait_for_deploy(
    provider: &dyn ContractProvider,
    address: &Address,
) -> ContractResult<()> {
    wait_for_deploy_with(
        provider,
        address,
        DEFAULT_DEPLOY_ATTEMPTS,
        DEFAULT_DEPLOY_INTERVAL,
    )
    .await
}

/// Polls until `address` is active, at most `attempts` times.
pub async fn wait_for_deploy_with(
    provider: &dyn ContractProvider,
    address: &Address,
    attempts: u32,
    interval: Duration,
) -> ContractResult<()> {
    for attempt in 1..=attempts {
        let state = provider.get_state(address).await?;
        debug!(%address, attempt, %state, "awaiting deployment");
        if state == AccountState::Active {
            info!(%address, "contract deployed");
            return Ok(());
        }
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Err(ContractError::DeployTimeout {
        address: *address,
        attempts,
    })
}
