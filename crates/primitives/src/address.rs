//! Implementation of `Address`, a TON standard internal address.

use crate::checksum::crc16;
use crate::constants::{FRIENDLY_ADDRESS_BYTES, FRIENDLY_ADDRESS_LENGTH, HASH_SIZE};
use crate::error::{PrimitiveError, PrimitiveResult};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const BOUNCEABLE_TAG: u8 = 0x11;
const NON_BOUNCEABLE_TAG: u8 = 0x51;
const TEST_FLAG: u8 = 0x80;

/// A standard internal address (`addr_std` without anycast).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    workchain: i8,
    hash: [u8; HASH_SIZE],
}

/// An address parsed from its user-friendly form together with its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendlyAddress {
    /// The decoded address.
    pub address: Address,
    /// Whether messages to this address should bounce on failure.
    pub bounceable: bool,
    /// Whether the address is flagged for test networks only.
    pub test_only: bool,
}

impl Address {
    /// Creates an address from its workchain and account id.
    #[inline]
    #[must_use]
    pub const fn new(workchain: i8, hash: [u8; HASH_SIZE]) -> Self {
        Self { workchain, hash }
    }

    /// Workchain id.
    #[inline]
    #[must_use]
    pub const fn workchain(&self) -> i8 {
        self.workchain
    }

    /// 256-bit account id.
    #[inline]
    #[must_use]
    pub const fn hash(&self) -> &[u8; HASH_SIZE] {
        &self.hash
    }

    /// Parses either the raw (`wc:hex`) or the user-friendly form.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidAddress` when the input matches neither
    /// form and `PrimitiveError::ChecksumMismatch` for a corrupted friendly form.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        if s.contains(':') {
            Self::parse_raw(s)
        } else {
            Self::parse_friendly(s).map(|friendly| friendly.address)
        }
    }

    /// Parses the raw `workchain:hex` form.
    pub fn parse_raw(s: &str) -> PrimitiveResult<Self> {
        let (workchain, hash) = s
            .split_once(':')
            .ok_or_else(|| PrimitiveError::invalid_address(format!("missing ':' in {s}")))?;

        let workchain = workchain
            .parse::<i8>()
            .map_err(|e| PrimitiveError::invalid_address(format!("bad workchain: {e}")))?;

        let bytes = hex::decode(hash)
            .map_err(|e| PrimitiveError::invalid_address(format!("bad account id: {e}")))?;
        let hash: [u8; HASH_SIZE] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            PrimitiveError::invalid_address(format!("account id is {} bytes", bytes.len()))
        })?;

        Ok(Self::new(workchain, hash))
    }

    /// Parses the 48-character user-friendly form (base64 or base64url).
    pub fn parse_friendly(s: &str) -> PrimitiveResult<FriendlyAddress> {
        if s.len() != FRIENDLY_ADDRESS_LENGTH {
            return Err(PrimitiveError::invalid_address(format!(
                "expected {FRIENDLY_ADDRESS_LENGTH} characters, got {}",
                s.len()
            )));
        }

        let normalized = s.replace('-', "+").replace('_', "/");
        let data = STANDARD
            .decode(normalized)
            .map_err(|e| PrimitiveError::invalid_address(format!("bad base64: {e}")))?;
        if data.len() != FRIENDLY_ADDRESS_BYTES {
            return Err(PrimitiveError::invalid_address(format!(
                "decoded {} bytes",
                data.len()
            )));
        }

        let expected = crc16(&data[..34]);
        let found = u16::from_be_bytes([data[34], data[35]]);
        if expected != found {
            return Err(PrimitiveError::ChecksumMismatch { expected, found });
        }

        let mut tag = data[0];
        let test_only = tag & TEST_FLAG != 0;
        if test_only {
            tag ^= TEST_FLAG;
        }
        let bounceable = match tag {
            BOUNCEABLE_TAG => true,
            NON_BOUNCEABLE_TAG => false,
            other => {
                return Err(PrimitiveError::invalid_address(format!(
                    "unknown tag {other:#04x}"
                )))
            }
        };

        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&data[2..34]);

        Ok(FriendlyAddress {
            address: Self::new(data[1] as i8, hash),
            bounceable,
            test_only,
        })
    }

    /// Returns `true` when `s` is in the user-friendly form.
    #[must_use]
    pub fn is_friendly(s: &str) -> bool {
        Self::parse_friendly(s).is_ok()
    }

    /// Formats as `workchain:hex`.
    #[must_use]
    pub fn to_raw_string(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Formats in the user-friendly form.
    #[must_use]
    pub fn to_friendly(&self, bounceable: bool, test_only: bool, url_safe: bool) -> String {
        let mut tag = if bounceable {
            BOUNCEABLE_TAG
        } else {
            NON_BOUNCEABLE_TAG
        };
        if test_only {
            tag |= TEST_FLAG;
        }

        let mut data = [0u8; FRIENDLY_ADDRESS_BYTES];
        data[0] = tag;
        data[1] = self.workchain as u8;
        data[2..34].copy_from_slice(&self.hash);
        let crc = crc16(&data[..34]);
        data[34..].copy_from_slice(&crc.to_be_bytes());

        if url_safe {
            URL_SAFE.encode(data)
        } else {
            STANDARD.encode(data)
        }
    }
}

impl fmt::Display for Address {
    /// Bounceable, url-safe, not test-only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_friendly(true, false, true))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_raw_string())
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TESTNET_FRIENDLY: &str = "kQAyPdkpHHVKUllXuTEN4zP9Qju-eGIUx9wYnjDKBhnWZ9l-";
    const RAW: &str = "0:323dd9291c754a525957b9310de333fd423bbe786214c7dc189e30ca0619d667";

    #[test]
    fn test_parse_friendly_flags() {
        let parsed = Address::parse_friendly(TESTNET_FRIENDLY).unwrap();
        assert!(parsed.bounceable);
        assert!(parsed.test_only);
        assert_eq!(parsed.address.workchain(), 0);
        assert_eq!(parsed.address.to_raw_string(), RAW);
    }

    #[test]
    fn test_friendly_variants() {
        let address = Address::parse(RAW).unwrap();
        assert_eq!(address.to_friendly(true, true, true), TESTNET_FRIENDLY);
        assert_eq!(
            address.to_string(),
            "EQAyPdkpHHVKUllXuTEN4zP9Qju-eGIUx9wYnjDKBhnWZ2L0"
        );
        assert_eq!(
            address.to_friendly(false, false, true),
            "UQAyPdkpHHVKUllXuTEN4zP9Qju-eGIUx9wYnjDKBhnWZz8x"
        );
    }

    #[test]
    fn test_standard_base64_accepted() {
        let standard = Address::parse(RAW).unwrap().to_friendly(true, false, false);
        assert_eq!(
            Address::parse(&standard).unwrap(),
            Address::parse(RAW).unwrap()
        );
    }

    #[test]
    fn test_checksum_mismatch() {
        let corrupted = TESTNET_FRIENDLY.replace("Z9l-", "Z9l_");
        assert!(matches!(
            Address::parse(&corrupted),
            Err(PrimitiveError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_masterchain_raw() {
        let address = Address::parse(&format!("-1:{}", "ab".repeat(32))).unwrap();
        assert_eq!(address.workchain(), -1);
        let friendly = address.to_friendly(true, false, true);
        assert_eq!(Address::parse(&friendly).unwrap(), address);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(Address::parse("").is_err());
        assert!(Address::parse("0:abcd").is_err());
        assert!(Address::parse("x:00").is_err());
        assert!(Address::parse("not-an-address").is_err());
    }

    #[test]
    fn test_serde_uses_raw_form() {
        let address = Address::parse(TESTNET_FRIENDLY).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{RAW}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
