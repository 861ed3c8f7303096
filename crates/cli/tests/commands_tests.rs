//! Commands run against the in-memory chain.

use std::time::Duration;
use ton_cell::{Cell, CellBuilder};
use ton_cli::commands::{address, deploy, load_code, read_greeting};
use ton_config::ScriptConfig;
use ton_contract::{CompiledArtifact, ContractError, HelloWorld, TupleItem, GET_GREETING};
use ton_primitives::Coins;
use ton_sandbox::Blockchain;

fn code() -> Cell {
    let mut builder = CellBuilder::new();
    builder.store_bytes(&[0xde, 0xad, 0xbe, 0xef]).unwrap();
    builder.end_cell()
}

fn chain() -> Blockchain {
    let chain = Blockchain::new();
    chain.register_getter(*code().hash(), GET_GREETING, |init, _args| {
        Ok(vec![TupleItem::Cell(init.data.begin_parse().load_ref()?)])
    });
    chain
}

#[tokio::test]
async fn test_deploy_then_read() {
    let chain = chain();
    let deployer = chain.treasury("deployer");

    let output = deploy::deploy_with(
        &chain,
        &deployer,
        code(),
        "Hello World!",
        Coins::from_ton("0.05").unwrap(),
        3,
        Duration::from_millis(1),
    )
    .await
    .unwrap();
    let expected = HelloWorld::create_from_config("Hello World!", code()).unwrap();
    assert_eq!(
        output,
        format!("Deployed HelloWorld at {}", expected.address())
    );

    let output = read_greeting::read_greeting(&chain, *expected.address())
        .await
        .unwrap();
    assert_eq!(output, "Greeting: Hello World!");
}

#[tokio::test]
async fn test_read_missing_contract_fails() {
    let chain = chain();
    let address = ScriptConfig::default().read_address().unwrap();
    let err = read_greeting::read_greeting(&chain, address)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContractError>(),
        Some(ContractError::NotDeployed { .. })
    ));
}

#[test]
fn test_address_output() {
    let output = address::address(code(), "Hello World!", false).unwrap();
    assert!(output.contains("0:0cf68b7ce880fd64850c6217bad4ae2b2809b4c9fade59f70be76ddd65459cfe"));
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn test_load_code_from_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ScriptConfig::default();
    config.contract.build_dir = dir.path().to_path_buf();

    assert!(load_code(&config).is_err());

    let artifact = CompiledArtifact::from_code(&code());
    std::fs::write(
        config.artifact_path(),
        serde_json::to_string(&artifact).unwrap(),
    )
    .unwrap();
    assert_eq!(load_code(&config).unwrap(), code());
}
