//! Protocol constants.

/// Basechain id.
pub const BASECHAIN: i8 = 0;

/// Masterchain id.
pub const MASTERCHAIN: i8 = -1;

/// Length of an account id in bytes.
pub const HASH_SIZE: usize = 32;

/// Decoded length of a user-friendly address: tag, workchain, hash, crc16.
pub const FRIENDLY_ADDRESS_BYTES: usize = 36;

/// Encoded length of a user-friendly address.
pub const FRIENDLY_ADDRESS_LENGTH: usize = 48;

/// Nanotons per TON.
pub const NANO_PER_TON: u128 = 1_000_000_000;

/// Decimal places of a TON amount.
pub const TON_DECIMALS: u32 = 9;
