//! Message cells.
//!
//! Both builders keep the state init in a reference. Internal messages with
//! an empty body store it inline; any other body goes into a reference.

use crate::error::ContractResult;
use crate::send_mode::SendMode;
use crate::state_init::StateInit;
use ton_cell::{Cell, CellBuilder};
use ton_primitives::{Address, Coins};

/// What a contract wrapper asks a sender to deliver.
#[derive(Debug, Clone)]
pub struct SenderArguments {
    /// Destination.
    pub to: Address,
    /// Attached value.
    pub value: Coins,
    /// Bounce back on failure.
    pub bounce: bool,
    /// How fees and value are handled.
    pub send_mode: SendMode,
    /// State to deploy at the destination, if any.
    pub init: Option<StateInit>,
    /// Message body.
    pub body: Cell,
}

/// An internal message as seen by a provider, before init resolution.
#[derive(Debug, Clone)]
pub struct InternalMessage {
    /// Attached value.
    pub value: Coins,
    /// Bounce back on failure.
    pub bounce: bool,
    /// How fees and value are handled.
    pub send_mode: SendMode,
    /// Message body.
    pub body: Cell,
}

impl InternalMessage {
    /// A bounceable message with an empty body.
    #[must_use]
    pub fn new(value: Coins, send_mode: SendMode) -> Self {
        Self {
            value,
            bounce: true,
            send_mode,
            body: Cell::empty(),
        }
    }
}

fn store_init(builder: &mut CellBuilder, init: Option<&StateInit>) -> ContractResult<()> {
    match init {
        Some(init) => {
            builder.store_bit(true)?.store_bit(true)?;
            builder.store_ref(init.to_cell()?)?;
        }
        None => {
            builder.store_bit(false)?;
        }
    }
    Ok(())
}

/// Builds `int_msg_info` with zero fees and timestamps; validators fill them in.
pub fn internal_message(src: Option<&Address>, args: &SenderArguments) -> ContractResult<Cell> {
    let mut builder = CellBuilder::new();
    builder
        .store_bit(false)?
        .store_bit(true)?
        .store_bit(args.bounce)?
        .store_bit(false)?
        .store_address(src)?
        .store_address(Some(&args.to))?
        .store_coins(args.value.as_nano())?
        .store_bit(false)?
        .store_coins(0)?
        .store_coins(0)?
        .store_uint(0, 64)?
        .store_uint(0, 32)?;
    store_init(&mut builder, args.init.as_ref())?;

    if args.body.is_empty() {
        builder.store_bit(false)?;
    } else {
        builder.store_bit(true)?.store_ref(args.body.clone())?;
    }
    Ok(builder.end_cell())
}

/// Builds `ext_in_msg_info` addressed to `dest` with the body in a reference.
pub fn external_message(
    dest: &Address,
    init: Option<&StateInit>,
    body: Cell,
) -> ContractResult<Cell> {
    let mut builder = CellBuilder::new();
    builder
        .store_uint(0b10, 2)?
        .store_address(None)?
        .store_address(Some(dest))?
        .store_coins(0)?;
    store_init(&mut builder, init)?;
    builder.store_bit(true)?.store_ref(body)?;
    Ok(builder.end_cell())
}
