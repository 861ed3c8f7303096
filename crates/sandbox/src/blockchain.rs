//! The in-memory chain.

use crate::transaction::{Transaction, TransactionKind};
use crate::treasury::{Treasury, TREASURY_BALANCE};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use ton_cell::{Cell, CellBuilder, CellHash};
use ton_contract::{
    AccountState, ContractError, ContractProvider, ContractResult, SenderArguments, StateInit,
    TupleItem, TupleReader,
};
use ton_primitives::{Address, Coins};
use tracing::{debug, info, warn};

/// Exit code reported when an account has no handler for a getter.
pub const EXIT_CODE_METHOD_NOT_FOUND: i32 = 11;

/// Emulated getter: receives the account's current code and data and the
/// call arguments, returns the result stack.
pub type GetterFn =
    Arc<dyn Fn(&StateInit, &[TupleItem]) -> ContractResult<Vec<TupleItem>> + Send + Sync>;

/// Snapshot of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account address.
    pub address: Address,
    /// Current balance.
    pub balance: Coins,
    /// Lifecycle state.
    pub state: AccountState,
    /// Installed code and data; `None` until deployed.
    pub init: Option<StateInit>,
}

impl Account {
    fn uninitialized(address: Address) -> Self {
        Self {
            address,
            balance: Coins::ZERO,
            state: AccountState::Uninitialized,
            init: None,
        }
    }

    /// Installs `init` unless the account is already active.
    fn deploy(&mut self, init: &StateInit) -> bool {
        if self.state == AccountState::Active {
            debug!(address = %self.address, "account already active, init ignored");
            return false;
        }
        self.state = AccountState::Active;
        self.init = Some(init.clone());
        info!(address = %self.address, "account deployed");
        true
    }
}

#[derive(Default)]
struct ChainState {
    accounts: HashMap<Address, Account>,
    getters: HashMap<(CellHash, String), GetterFn>,
    transactions: Vec<Transaction>,
    lt: u64,
}

impl ChainState {
    fn next_lt(&mut self) -> u64 {
        self.lt += 1;
        self.lt
    }
}

/// Shared handle on one in-memory chain. Clones see the same state.
#[derive(Clone, Default)]
pub struct Blockchain {
    state: Arc<Mutex<ChainState>>,
}

impl Blockchain {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// A funded sender named `name`. The same name always yields the same
    /// account.
    pub fn treasury(&self, name: &str) -> Treasury {
        let treasury = Treasury::new(self.clone(), name);
        let address = treasury.address();
        self.state
            .lock()
            .accounts
            .entry(address)
            .or_insert_with(|| Account {
                address,
                balance: TREASURY_BALANCE,
                state: AccountState::Active,
                init: None,
            });
        treasury
    }

    /// Installs a getter handler for every account running `code_hash`.
    pub fn register_getter<F>(&self, code_hash: CellHash, name: &str, handler: F)
    where
        F: Fn(&StateInit, &[TupleItem]) -> ContractResult<Vec<TupleItem>> + Send + Sync + 'static,
    {
        self.state
            .lock()
            .getters
            .insert((code_hash, name.to_string()), Arc::new(handler));
    }

    /// Snapshot of the account at `address`, if it has ever been touched.
    pub fn account(&self, address: &Address) -> Option<Account> {
        self.state.lock().accounts.get(address).cloned()
    }

    /// Balance of `address`; zero for unknown accounts.
    pub fn balance(&self, address: &Address) -> Coins {
        self.account(address)
            .map(|account| account.balance)
            .unwrap_or(Coins::ZERO)
    }

    /// Every processed message, oldest first.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().transactions.clone()
    }

    pub(crate) fn deliver_internal(&self, from: Address, args: SenderArguments) -> ContractResult<()> {
        let to = args.to;
        let deploys_here = match &args.init {
            Some(init) => init.address(to.workchain())? == to,
            None => false,
        };
        if args.init.is_some() && !deploys_here {
            warn!(%to, "state init does not hash to destination, ignoring it");
        }

        let mut state = self.state.lock();
        let sender = state
            .accounts
            .get_mut(&from)
            .ok_or(ContractError::NotDeployed { address: from })?;
        sender.balance = sender.balance.checked_sub(args.value).ok_or_else(|| {
            ContractError::sender(format!(
                "{from} cannot send {} with balance {}",
                args.value, sender.balance
            ))
        })?;

        let destination = state
            .accounts
            .entry(to)
            .or_insert_with(|| Account::uninitialized(to));
        let deployed = match &args.init {
            Some(init) if deploys_here => destination.deploy(init),
            _ => false,
        };
        let bounced = args.bounce && destination.state != AccountState::Active;
        let credit_to = if bounced { from } else { to };
        if let Some(account) = state.accounts.get_mut(&credit_to) {
            account.balance = account
                .balance
                .checked_add(args.value)
                .ok_or_else(|| ContractError::sender("balance overflow"))?;
        }

        let lt = state.next_lt();
        debug!(lt, %from, %to, value = %args.value, deployed, bounced, "internal message");
        state.transactions.push(Transaction {
            lt,
            kind: TransactionKind::Internal,
            from: Some(from),
            to,
            value: if bounced { Coins::ZERO } else { args.value },
            deployed,
            bounced,
        });
        Ok(())
    }

    fn deliver_external(&self, message: &Cell) -> ContractResult<()> {
        let mut slice = message.begin_parse();
        if slice.load_uint(2)? != 0b10 {
            return Err(ContractError::Provider("not an inbound external message".into()));
        }
        slice.load_address()?;
        let to = slice
            .load_address()?
            .ok_or_else(|| ContractError::Provider("external message without destination".into()))?;
        slice.load_coins()?;
        let init = if slice.load_bit()? {
            let init_cell = if slice.load_bit()? {
                slice.load_ref()?
            } else {
                return Err(ContractError::Provider("inline state init is not supported".into()));
            };
            Some(StateInit::from_cell(&init_cell)?)
        } else {
            None
        };
        let body = if slice.load_bit()? {
            slice.load_ref()?
        } else {
            let mut builder = CellBuilder::new();
            builder.store_slice(&slice)?;
            builder.end_cell()
        };

        let deploys_here = match &init {
            Some(init) => init.address(to.workchain())? == to,
            None => false,
        };

        let mut state = self.state.lock();
        let account = state
            .accounts
            .entry(to)
            .or_insert_with(|| Account::uninitialized(to));
        let deployed = match &init {
            Some(init) if deploys_here => account.deploy(init),
            _ => false,
        };
        if account.state != AccountState::Active {
            return Err(ContractError::NotDeployed { address: to });
        }

        let lt = state.next_lt();
        debug!(lt, %to, body_hash = %body.hash_hex(), deployed, "external message");
        state.transactions.push(Transaction {
            lt,
            kind: TransactionKind::External,
            from: None,
            to,
            value: Coins::ZERO,
            deployed,
            bounced: false,
        });
        Ok(())
    }
}

#[async_trait]
impl ContractProvider for Blockchain {
    async fn get_state(&self, address: &Address) -> ContractResult<AccountState> {
        Ok(self
            .account(address)
            .map(|account| account.state)
            .unwrap_or(AccountState::Uninitialized))
    }

    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: Vec<TupleItem>,
    ) -> ContractResult<TupleReader> {
        let (init, handler) = {
            let state = self.state.lock();
            let init = state
                .accounts
                .get(address)
                .filter(|account| account.state == AccountState::Active)
                .and_then(|account| account.init.clone())
                .ok_or(ContractError::NotDeployed { address: *address })?;
            let handler = state
                .getters
                .get(&(*init.code.hash(), method.to_string()))
                .cloned();
            (init, handler)
        };

        let handler = handler.ok_or_else(|| ContractError::GetterFailed {
            method: method.to_string(),
            exit_code: EXIT_CODE_METHOD_NOT_FOUND,
        })?;
        debug!(%address, method, "running getter");
        Ok(TupleReader::new(handler(&init, &args)?))
    }

    async fn send_boc(&self, boc: Vec<u8>) -> ContractResult<()> {
        let message = Cell::from_boc(&boc)?;
        self.deliver_external(&message)
    }
}

impl std::fmt::Debug for Blockchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Blockchain")
            .field("accounts", &state.accounts.len())
            .field("transactions", &state.transactions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ton_contract::{SendMode, Sender};

    fn code(tag: u8) -> Cell {
        let mut builder = CellBuilder::new();
        builder.store_uint(u128::from(tag), 8).unwrap();
        builder.end_cell()
    }

    fn deploy_args(init: &StateInit, value: Coins) -> SenderArguments {
        SenderArguments {
            to: init.address(0).unwrap(),
            value,
            bounce: true,
            send_mode: SendMode::PAY_GAS_SEPARATELY,
            init: Some(init.clone()),
            body: Cell::empty(),
        }
    }

    #[tokio::test]
    async fn test_deploy_credits_and_activates() {
        let chain = Blockchain::new();
        let treasury = chain.treasury("deployer");
        let init = StateInit::new(code(1), Cell::empty());
        let value = Coins::from_nano(5);

        treasury.send(deploy_args(&init, value)).await.unwrap();

        let account = chain.account(&init.address(0).unwrap()).unwrap();
        assert_eq!(account.state, AccountState::Active);
        assert_eq!(account.balance, value);
        assert_eq!(account.init, Some(init));
        assert_eq!(
            chain.balance(&treasury.address()),
            TREASURY_BALANCE.checked_sub(value).unwrap()
        );
    }

    #[tokio::test]
    async fn test_mismatched_init_bounces() {
        let chain = Blockchain::new();
        let treasury = chain.treasury("deployer");
        let init = StateInit::new(code(1), Cell::empty());
        let mut args = deploy_args(&init, Coins::from_nano(5));
        args.to = Address::new(0, [9; 32]);

        treasury.send(args).await.unwrap();

        let tx = chain.transactions().pop().unwrap();
        assert!(tx.bounced);
        assert!(!tx.deployed);
        assert_eq!(chain.balance(&treasury.address()), TREASURY_BALANCE);
    }

    #[tokio::test]
    async fn test_missing_getter_exit_code() {
        let chain = Blockchain::new();
        let treasury = chain.treasury("deployer");
        let init = StateInit::new(code(2), Cell::empty());
        treasury
            .send(deploy_args(&init, Coins::from_nano(1)))
            .await
            .unwrap();

        let err = chain
            .run_get_method(&init.address(0).unwrap(), "seqno", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::GetterFailed { exit_code: EXIT_CODE_METHOD_NOT_FOUND, .. }
        ));
    }

    #[tokio::test]
    async fn test_getter_on_unknown_account() {
        let chain = Blockchain::new();
        let err = chain
            .run_get_method(&Address::new(0, [3; 32]), "getGreeting", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::NotDeployed { .. }));
        assert_eq!(
            chain.get_state(&Address::new(0, [3; 32])).await.unwrap(),
            AccountState::Uninitialized
        );
    }

    #[tokio::test]
    async fn test_insufficient_balance() {
        let chain = Blockchain::new();
        let treasury = chain.treasury("poor");
        let init = StateInit::new(code(3), Cell::empty());
        let args = deploy_args(&init, TREASURY_BALANCE.checked_add(Coins::from_nano(1)).unwrap());
        assert!(matches!(
            treasury.send(args).await.unwrap_err(),
            ContractError::Sender { .. }
        ));
        assert!(chain.transactions().is_empty());
    }

    #[test]
    fn test_treasury_is_stable_per_name() {
        let chain = Blockchain::new();
        assert_eq!(chain.treasury("a").address(), chain.treasury("a").address());
        assert_ne!(chain.treasury("a").address(), chain.treasury("b").address());
    }
}
