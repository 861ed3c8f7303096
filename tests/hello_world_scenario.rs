//! End-to-end scenario: deploy "Hello World!" with 0.05 TON, then read it
//! back through a fresh address-only handle.

use ton_cell::{Cell, CellBuilder};
use ton_contract::{
    wait_for_deploy, CompiledArtifact, ContractError, ContractIdentity, HelloWorld, TupleItem,
    GET_GREETING,
};
use ton_primitives::{Address, Coins};
use ton_sandbox::Blockchain;

fn compiled_code() -> Cell {
    let mut builder = CellBuilder::new();
    builder.store_bytes(&[0xde, 0xad, 0xbe, 0xef]).unwrap();
    let artifact = CompiledArtifact::from_code(&builder.end_cell());
    artifact.code().unwrap()
}

fn blockchain(code: &Cell) -> Blockchain {
    let chain = Blockchain::new();
    chain.register_getter(*code.hash(), GET_GREETING, |init, _args| {
        Ok(vec![TupleItem::Cell(init.data.begin_parse().load_ref()?)])
    });
    chain
}

#[tokio::test]
async fn test_deploy_and_read_scenario() {
    let code = compiled_code();
    let chain = blockchain(&code);
    let deployer = chain.treasury("deployer");

    let contract = HelloWorld::create_from_config("Hello World!", code.clone()).unwrap();
    assert!(matches!(contract.identity(), ContractIdentity::Init { .. }));
    assert_eq!(
        contract.address().to_raw_string(),
        "0:0cf68b7ce880fd64850c6217bad4ae2b2809b4c9fade59f70be76ddd65459cfe"
    );

    contract
        .send_deploy(&chain, &deployer, Coins::from_ton("0.05").unwrap())
        .await
        .unwrap();
    wait_for_deploy(&chain, contract.address()).await.unwrap();

    let friendly = contract.address().to_friendly(true, true, true);
    let reader = HelloWorld::create_from_address(friendly.parse().unwrap());
    assert_eq!(reader.address(), contract.address());
    assert_eq!(reader.get_greeting(&chain).await.unwrap(), "Hello World!");
}

#[tokio::test]
async fn test_address_only_handle_cannot_deploy() {
    let code = compiled_code();
    let chain = blockchain(&code);
    let deployer = chain.treasury("deployer");
    let address: Address = "kQAyPdkpHHVKUllXuTEN4zP9Qju-eGIUx9wYnjDKBhnWZ9l-"
        .parse()
        .unwrap();

    let err = HelloWorld::create_from_address(address)
        .send_deploy(&chain, &deployer, Coins::from_ton("0.05").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ContractError::MissingInit { .. }));
    assert!(chain.transactions().is_empty());
}
