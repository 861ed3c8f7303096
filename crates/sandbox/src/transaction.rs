//! Transaction log entries.

use ton_primitives::{Address, Coins};

/// How a message entered the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Sent by another account.
    Internal,
    /// Submitted from outside as a serialized message.
    External,
}

/// One processed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Logical time, strictly increasing per chain.
    pub lt: u64,
    /// Message origin.
    pub kind: TransactionKind,
    /// Sender, for internal messages.
    pub from: Option<Address>,
    /// Destination account.
    pub to: Address,
    /// Value credited to the destination.
    pub value: Coins,
    /// This message installed code and data.
    pub deployed: bool,
    /// Value was returned to the sender.
    pub bounced: bool,
}
