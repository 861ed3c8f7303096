use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Toncenter v2 API on mainnet.
pub const MAINNET_ENDPOINT: &str = "https://toncenter.com/api/v2";

/// Toncenter v2 API on testnet.
pub const TESTNET_ENDPOINT: &str = "https://testnet.toncenter.com/api/v2";

/// Network type for TON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    #[default]
    Testnet,
}

impl NetworkType {
    /// Default RPC endpoint
    pub fn endpoint(&self) -> &'static str {
        match self {
            NetworkType::Mainnet => MAINNET_ENDPOINT,
            NetworkType::Testnet => TESTNET_ENDPOINT,
        }
    }

    /// Whether user-friendly addresses should carry the test-only flag
    pub fn is_test_only(&self) -> bool {
        matches!(self, NetworkType::Testnet)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "mainnet"),
            NetworkType::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::Mainnet),
            "testnet" | "test" => Ok(NetworkType::Testnet),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}
