//! Script configuration file.

use crate::error::{ConfigError, ConfigResult};
use crate::network::NetworkType;
use crate::{
    DEFAULT_BUILD_DIR, DEFAULT_CONFIG_FILE, DEFAULT_CONTRACT_NAME, DEFAULT_DEPLOY_VALUE,
    DEFAULT_GREETING, DEFAULT_READ_ADDRESS, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_ENDPOINT,
    ENV_WALLET_ADDRESS, ENV_WALLET_SECRET,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use ton_primitives::{Address, Coins};
use tracing::{debug, info};
use url::Url;

/// Complete script configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// RPC access
    pub network: NetworkConfig,
    /// Wallet paying for deployment
    pub wallet: WalletConfig,
    /// Contract parameters
    pub contract: ContractConfig,
}

/// RPC access configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network selecting the default endpoint
    #[serde(rename = "type")]
    pub network_type: NetworkType,
    /// Endpoint overriding the network default
    pub endpoint: Option<String>,
    /// Toncenter API key
    pub api_key: Option<String>,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network_type: NetworkType::default(),
            endpoint: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Deployer wallet configuration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Address of a deployed v4 wallet
    pub address: Option<String>,
    /// Hex-encoded Ed25519 seed or secret key
    pub secret_key: Option<String>,
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("address", &self.address)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Contract parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Directory holding compiled artifacts
    pub build_dir: PathBuf,
    /// Contract name
    pub name: String,
    /// Greeting stored on deploy
    pub greeting: String,
    /// Deploy value in TON
    pub deploy_value: String,
    /// Address queried by the read script
    pub read_address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            name: DEFAULT_CONTRACT_NAME.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            deploy_value: DEFAULT_DEPLOY_VALUE.to_string(),
            read_address: DEFAULT_READ_ADDRESS.to_string(),
        }
    }
}

impl ScriptConfig {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads `path` if given, else `hello-world.toml` if present, else
    /// defaults. An explicit path that does not exist is an error.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(default_path)
                } else {
                    info!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `TON_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Applies `TON_*` overrides read through `lookup`. Empty values are
    /// ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            debug!(env = ENV_ENDPOINT, "endpoint overridden from environment");
            self.network.endpoint = Some(endpoint);
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.network.api_key = Some(api_key);
        }
        if let Some(address) = get(ENV_WALLET_ADDRESS) {
            self.wallet.address = Some(address);
        }
        if let Some(secret) = get(ENV_WALLET_SECRET) {
            self.wallet.secret_key = Some(secret);
        }
    }

    /// RPC endpoint: the explicit one, or the network default.
    pub fn endpoint(&self) -> ConfigResult<Url> {
        let endpoint = self
            .network
            .endpoint
            .as_deref()
            .unwrap_or_else(|| self.network.network_type.endpoint());
        Url::parse(endpoint).map_err(|e| ConfigError::invalid("network.endpoint", e.to_string()))
    }

    /// HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.network.timeout_secs)
    }

    /// Deploy value.
    pub fn deploy_value(&self) -> ConfigResult<Coins> {
        Coins::from_ton(&self.contract.deploy_value)
            .map_err(|e| ConfigError::invalid("contract.deploy_value", e.to_string()))
    }

    /// Address the read script queries.
    pub fn read_address(&self) -> ConfigResult<Address> {
        Address::parse(&self.contract.read_address)
            .map_err(|e| ConfigError::invalid("contract.read_address", e.to_string()))
    }

    /// Path of the compiled contract artifact.
    pub fn artifact_path(&self) -> PathBuf {
        self.contract
            .build_dir
            .join(format!("{}.compiled.json", self.contract.name))
    }

    /// Deployer wallet address.
    pub fn wallet_address(&self) -> ConfigResult<Address> {
        let address = self.wallet.address.as_deref().ok_or(ConfigError::Missing {
            field: "wallet.address",
            env: ENV_WALLET_ADDRESS,
        })?;
        Address::parse(address).map_err(|e| ConfigError::invalid("wallet.address", e.to_string()))
    }

    /// Deployer wallet secret key, hex-encoded.
    pub fn wallet_secret(&self) -> ConfigResult<&str> {
        self.wallet.secret_key.as_deref().ok_or(ConfigError::Missing {
            field: "wallet.secret_key",
            env: ENV_WALLET_SECRET,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.network.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "network.timeout_secs",
                "must be greater than 0",
            ));
        }
        if self.contract.name.is_empty() {
            return Err(ConfigError::invalid("contract.name", "must not be empty"));
        }
        self.endpoint()?;
        self.deploy_value()?;
        self.read_address()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ScriptConfig::default();
        config.validate().unwrap();
        assert_eq!(config.deploy_value().unwrap().as_nano(), 50_000_000);
        assert_eq!(config.contract.greeting, "Hello World!");
        assert_eq!(
            config.read_address().unwrap().to_raw_string(),
            "0:323dd9291c754a525957b9310de333fd423bbe786214c7dc189e30ca0619d667"
        );
        assert_eq!(config.endpoint().unwrap().as_str(), "https://testnet.toncenter.com/api/v2");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(
            config.artifact_path(),
            PathBuf::from("build").join("HelloWorld.compiled.json")
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ENDPOINT, "http://localhost:8081/api/v2"),
            (ENV_API_KEY, ""),
            (ENV_WALLET_SECRET, "00ff"),
        ]
        .into_iter()
        .collect();

        let mut config = ScriptConfig::default();
        config.network.api_key = Some("from-file".to_string());
        config.apply_env_from(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.endpoint().unwrap().as_str(), "http://localhost:8081/api/v2");
        assert_eq!(config.network.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.wallet_secret().unwrap(), "00ff");
        assert!(matches!(
            config.wallet_address().unwrap_err(),
            ConfigError::Missing { env: ENV_WALLET_ADDRESS, .. }
        ));
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = ScriptConfig::default();
        config.contract.deploy_value = "0.0000000001".to_string();
        assert!(config.validate().is_err());

        let mut config = ScriptConfig::default();
        config.network.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let wallet = WalletConfig {
            address: None,
            secret_key: Some("deadbeef".to_string()),
        };
        assert!(!format!("{wallet:?}").contains("deadbeef"));
    }
}
