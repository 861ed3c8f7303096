//! HelloWorld deploy and read round trips on the in-memory chain.

use ton_cell::{Cell, CellBuilder};
use ton_contract::{
    wait_for_deploy, AccountState, ContractError, ContractProvider, HelloWorld, SendMode,
    TupleItem, GET_GREETING,
};
use ton_primitives::Coins;
use ton_sandbox::{Blockchain, TransactionKind};

fn code() -> Cell {
    let mut builder = CellBuilder::new();
    builder.store_bytes(&[0xde, 0xad, 0xbe, 0xef]).unwrap();
    builder.end_cell()
}

fn chain_with_hello_world() -> Blockchain {
    let chain = Blockchain::new();
    chain.register_getter(*code().hash(), GET_GREETING, |init, _args| {
        let greeting = init.data.begin_parse().load_ref()?;
        Ok(vec![TupleItem::Cell(greeting)])
    });
    chain
}

#[tokio::test]
async fn test_deploy_then_read_greeting() {
    let chain = chain_with_hello_world();
    let deployer = chain.treasury("deployer");
    let contract = HelloWorld::create_from_config("Hello World!", code()).unwrap();

    contract
        .send_deploy(&chain, &deployer, Coins::from_ton("0.05").unwrap())
        .await
        .unwrap();
    wait_for_deploy(&chain, contract.address()).await.unwrap();

    assert_eq!(contract.get_greeting(&chain).await.unwrap(), "Hello World!");
    assert_eq!(chain.balance(contract.address()).as_nano(), 50_000_000);

    let txs = chain.transactions();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind, TransactionKind::Internal);
    assert_eq!(txs[0].from, Some(deployer.address()));
    assert!(txs[0].deployed);
}

#[tokio::test]
async fn test_read_through_address_handle() {
    let chain = chain_with_hello_world();
    let deployer = chain.treasury("deployer");
    let contract = HelloWorld::create_from_config("gm", code()).unwrap();
    contract
        .send_deploy(&chain, &deployer, Coins::from_nano(1_000))
        .await
        .unwrap();

    let reader = HelloWorld::create_from_address(*contract.address());
    assert_eq!(reader.get_greeting(&chain).await.unwrap(), "gm");
}

#[tokio::test]
async fn test_long_and_empty_greetings_round_trip() {
    let chain = chain_with_hello_world();
    let deployer = chain.treasury("deployer");
    let long = "TON ".repeat(100);

    for greeting in [long.as_str(), "", "héllo wörld ✓"] {
        let contract = HelloWorld::create_from_config(greeting, code()).unwrap();
        contract
            .send_deploy(&chain, &deployer, Coins::from_nano(1))
            .await
            .unwrap();
        assert_eq!(contract.get_greeting(&chain).await.unwrap(), greeting);
    }

    let long_cell = HelloWorld::greeting_cell(&long).unwrap();
    assert_eq!(long_cell.refs().len(), 1);
}

#[tokio::test]
async fn test_redeploy_is_ignored() {
    let chain = chain_with_hello_world();
    let deployer = chain.treasury("deployer");
    let contract = HelloWorld::create_from_config("Hello World!", code()).unwrap();

    for _ in 0..2 {
        contract
            .send_deploy(&chain, &deployer, Coins::from_nano(10))
            .await
            .unwrap();
    }

    let txs = chain.transactions();
    assert_eq!(txs.len(), 2);
    assert!(txs[0].deployed);
    assert!(!txs[1].deployed);
    assert!(!txs[1].bounced);
    assert_eq!(chain.balance(contract.address()).as_nano(), 20);
    assert_eq!(
        chain.get_state(contract.address()).await.unwrap(),
        AccountState::Active
    );
}

#[tokio::test]
async fn test_read_before_deploy_fails() {
    let chain = chain_with_hello_world();
    let contract = HelloWorld::create_from_config("Hello World!", code()).unwrap();
    let err = contract.get_greeting(&chain).await.unwrap_err();
    assert!(matches!(err, ContractError::NotDeployed { .. }));
}

#[tokio::test]
async fn test_deploy_message_uses_pay_gas_separately() {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use ton_contract::{ContractResult, Sender, SenderArguments};
    use ton_primitives::Address;

    struct Spy<'a> {
        inner: &'a dyn Sender,
        modes: Mutex<Vec<SendMode>>,
    }

    #[async_trait]
    impl Sender for Spy<'_> {
        fn address(&self) -> Option<Address> {
            self.inner.address()
        }

        async fn send(&self, args: SenderArguments) -> ContractResult<()> {
            self.modes.lock().push(args.send_mode);
            self.inner.send(args).await
        }
    }

    let chain = chain_with_hello_world();
    let deployer = chain.treasury("deployer");
    let spy = Spy {
        inner: &deployer,
        modes: Mutex::new(Vec::new()),
    };
    let contract = HelloWorld::create_from_config("Hello World!", code()).unwrap();
    contract
        .send_deploy(&chain, &spy, Coins::from_nano(1))
        .await
        .unwrap();
    assert_eq!(spy.modes.lock().as_slice(), &[SendMode::PAY_GAS_SEPARATELY]);
}
