//! Wrapper for the HelloWorld greeting contract.
//!
//! Storage layout: a cell with no data bits and a single reference to the
//! greeting, which is stored as a string tail. The getter `getGreeting`
//! returns that referenced cell.

use crate::error::{ContractError, ContractResult};
use crate::message::InternalMessage;
use crate::provider::{ContractProvider, Sender};
use crate::send_mode::SendMode;
use crate::state_init::{contract_address, StateInit};
use ton_cell::{Cell, CellBuilder};
use ton_primitives::{Address, Coins, BASECHAIN};
use tracing::{debug, info};

/// Name of the read-only greeting getter.
pub const GET_GREETING: &str = "getGreeting";

/// How a handle identifies its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractIdentity {
    /// A known, presumably deployed, address.
    Address(Address),
    /// An address derived from the init package that will deploy there.
    Init {
        /// Derived address.
        address: Address,
        /// Code and initial storage.
        init: StateInit,
    },
}

impl ContractIdentity {
    /// Address in either form.
    #[must_use]
    pub fn address(&self) -> &Address {
        match self {
            Self::Address(address) => address,
            Self::Init { address, .. } => address,
        }
    }

    /// Init package, if carried.
    #[must_use]
    pub fn init(&self) -> Option<&StateInit> {
        match self {
            Self::Address(_) => None,
            Self::Init { init, .. } => Some(init),
        }
    }
}

/// Handle on one HelloWorld contract instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloWorld {
    identity: ContractIdentity,
}

impl HelloWorld {
    /// Encodes a greeting as a string-tail cell.
    pub fn greeting_cell(greeting: &str) -> ContractResult<Cell> {
        let mut builder = CellBuilder::new();
        builder.store_string_tail(greeting)?;
        Ok(builder.end_cell())
    }

    /// Builds the initial storage cell around an encoded greeting.
    pub fn config_to_cell(greeting: &Cell) -> ContractResult<Cell> {
        let mut builder = CellBuilder::new();
        builder.store_ref(greeting.clone())?;
        Ok(builder.end_cell())
    }

    /// Handle for a new contract in the basechain.
    pub fn create_from_config(greeting: &str, code: Cell) -> ContractResult<Self> {
        Self::create_from_config_in(greeting, code, BASECHAIN)
    }

    /// Handle for a new contract in `workchain`.
    pub fn create_from_config_in(greeting: &str, code: Cell, workchain: i8) -> ContractResult<Self> {
        Self::create_from_greeting_cell(Self::greeting_cell(greeting)?, code, workchain)
    }

    /// Handle for a new contract whose greeting is already encoded.
    pub fn create_from_greeting_cell(
        greeting: Cell,
        code: Cell,
        workchain: i8,
    ) -> ContractResult<Self> {
        let data = Self::config_to_cell(&greeting)?;
        let init = StateInit::new(code, data);
        let address = contract_address(workchain, &init)?;
        debug!(%address, code_hash = %init.code.hash_hex(), "derived HelloWorld address");
        Ok(Self {
            identity: ContractIdentity::Init { address, init },
        })
    }

    /// Handle for an existing contract.
    #[must_use]
    pub fn create_from_address(address: Address) -> Self {
        Self {
            identity: ContractIdentity::Address(address),
        }
    }

    /// Contract address.
    #[must_use]
    pub fn address(&self) -> &Address {
        self.identity.address()
    }

    /// Init package, present only for handles built from config.
    #[must_use]
    pub fn init(&self) -> Option<&StateInit> {
        self.identity.init()
    }

    /// How this handle was built.
    #[must_use]
    pub fn identity(&self) -> &ContractIdentity {
        &self.identity
    }

    /// Deploys the contract by sending `value` with an empty body.
    ///
    /// # Errors
    ///
    /// `ContractError::MissingInit` for address-only handles; nothing is sent
    /// in that case. Provider and sender failures are returned unchanged.
    pub async fn send_deploy(
        &self,
        provider: &dyn ContractProvider,
        via: &dyn Sender,
        value: Coins,
    ) -> ContractResult<()> {
        let init = self.init().ok_or(ContractError::MissingInit {
            address: *self.address(),
        })?;

        info!(address = %self.address(), %value, "deploying HelloWorld");
        provider
            .internal(
                via,
                self.address(),
                Some(init),
                InternalMessage::new(value, SendMode::PAY_GAS_SEPARATELY),
            )
            .await
    }

    /// Reads the stored greeting through the `getGreeting` getter.
    pub async fn get_greeting(&self, provider: &dyn ContractProvider) -> ContractResult<String> {
        let mut stack = provider
            .run_get_method(self.address(), GET_GREETING, Vec::new())
            .await?;
        let cell = stack.read_cell()?;
        let greeting = cell.begin_parse().load_string_tail()?;
        debug!(address = %self.address(), %greeting, "read greeting");
        Ok(greeting)
    }
}
