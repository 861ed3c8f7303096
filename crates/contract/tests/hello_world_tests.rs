//! HelloWorld wrapper against scripted providers.

use async_trait::async_trait;
use num_bigint::BigInt;
use parking_lot::Mutex;
use ton_cell::Cell;
use ton_contract::{
    AccountState, ContractError, ContractProvider, ContractResult, HelloWorld, SendMode, Sender,
    SenderArguments, TupleItem, TupleReader, GET_GREETING,
};
use ton_primitives::{Address, Coins};

#[derive(Default)]
struct FixedProvider {
    stack: Vec<TupleItem>,
    calls: Mutex<Vec<(Address, String)>>,
}

#[async_trait]
impl ContractProvider for FixedProvider {
    async fn get_state(&self, _address: &Address) -> ContractResult<AccountState> {
        Ok(AccountState::Uninitialized)
    }

    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: Vec<TupleItem>,
    ) -> ContractResult<TupleReader> {
        assert!(args.is_empty());
        self.calls.lock().push((*address, method.to_string()));
        Ok(TupleReader::new(self.stack.clone()))
    }

    async fn send_boc(&self, _boc: Vec<u8>) -> ContractResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<SenderArguments>>,
}

#[async_trait]
impl Sender for RecordingSender {
    fn address(&self) -> Option<Address> {
        None
    }

    async fn send(&self, args: SenderArguments) -> ContractResult<()> {
        self.sent.lock().push(args);
        Ok(())
    }
}

fn code() -> Cell {
    HelloWorld::greeting_cell("code placeholder").unwrap()
}

#[tokio::test]
async fn test_send_deploy_message_shape() {
    let handle = HelloWorld::create_from_config("Hello World!", code()).unwrap();
    let provider = FixedProvider::default();
    let sender = RecordingSender::default();

    handle
        .send_deploy(&provider, &sender, Coins::from_ton("0.05").unwrap())
        .await
        .unwrap();

    let sent = sender.sent.lock();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(&message.to, handle.address());
    assert_eq!(message.value.as_nano(), 50_000_000);
    assert_eq!(message.send_mode, SendMode::PAY_GAS_SEPARATELY);
    assert!(message.body.is_empty());
    assert_eq!(message.init.as_ref(), handle.init());
}

#[tokio::test]
async fn test_send_deploy_requires_init() {
    let handle = HelloWorld::create_from_address(Address::new(0, [1; 32]));
    let provider = FixedProvider::default();
    let sender = RecordingSender::default();

    let err = handle
        .send_deploy(&provider, &sender, Coins::from_nano(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ContractError::MissingInit { .. }));
    assert!(sender.sent.lock().is_empty());
}

#[tokio::test]
async fn test_get_greeting_decodes_cell() {
    let provider = FixedProvider {
        stack: vec![TupleItem::Cell(HelloWorld::greeting_cell("Hello World!").unwrap())],
        ..Default::default()
    };
    let address = Address::new(0, [2; 32]);
    let handle = HelloWorld::create_from_address(address);

    assert_eq!(handle.get_greeting(&provider).await.unwrap(), "Hello World!");
    assert_eq!(
        provider.calls.lock().as_slice(),
        &[(address, GET_GREETING.to_string())]
    );
}

#[tokio::test]
async fn test_get_greeting_rejects_non_cell() {
    let provider = FixedProvider {
        stack: vec![TupleItem::Int(BigInt::from(42))],
        ..Default::default()
    };
    let handle = HelloWorld::create_from_address(Address::new(0, [2; 32]));
    let err = handle.get_greeting(&provider).await.unwrap_err();
    assert!(matches!(err, ContractError::StackType { .. }));
}
