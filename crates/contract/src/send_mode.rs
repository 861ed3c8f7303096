//! Outbound message send modes.

use bitflags::bitflags;

bitflags! {
    /// Flags passed to the sending wallet alongside each message.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SendMode: u8 {
        /// Pay forwarding fees from the wallet balance, not the message value.
        const PAY_GAS_SEPARATELY = 1;
        /// Ignore errors during the action phase.
        const IGNORE_ERRORS = 2;
        /// Destroy the account when its balance reaches zero.
        const DESTROY_ACCOUNT_IF_ZERO = 32;
        /// Carry the remaining value of the inbound message.
        const CARRY_ALL_REMAINING_INCOMING_VALUE = 64;
        /// Carry the whole remaining balance.
        const CARRY_ALL_REMAINING_BALANCE = 128;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits() {
        assert_eq!(SendMode::PAY_GAS_SEPARATELY.bits(), 1);
        let mode = SendMode::PAY_GAS_SEPARATELY | SendMode::IGNORE_ERRORS;
        assert_eq!(mode.bits(), 3);
        assert!(mode.contains(SendMode::IGNORE_ERRORS));
    }
}
