//! TON Configuration Module
//!
//! Configuration for the HelloWorld deploy and read scripts: which network to
//! talk to, which wallet pays for deployment, and the contract parameters.
//!
//! Values are layered, later layers winning:
//! 1. built-in defaults
//! 2. the TOML file (`hello-world.toml`)
//! 3. `TON_*` environment variables
//! 4. command-line flags, applied by the caller

mod error;
mod network;
mod script_config;

pub use error::{ConfigError, ConfigResult};
pub use network::{NetworkType, MAINNET_ENDPOINT, TESTNET_ENDPOINT};
pub use script_config::{ContractConfig, NetworkConfig, ScriptConfig, WalletConfig};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hello-world.toml";

/// Greeting stored by the deploy script.
pub const DEFAULT_GREETING: &str = "Hello World!";

/// Value attached to the deploy message, in TON.
pub const DEFAULT_DEPLOY_VALUE: &str = "0.05";

/// Address the read script queries unless told otherwise.
pub const DEFAULT_READ_ADDRESS: &str = "kQAyPdkpHHVKUllXuTEN4zP9Qju-eGIUx9wYnjDKBhnWZ9l-";

/// HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory holding compiled contracts.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Contract name; the artifact is `<build_dir>/<name>.compiled.json`.
pub const DEFAULT_CONTRACT_NAME: &str = "HelloWorld";

/// Environment variable overriding the RPC endpoint.
pub const ENV_ENDPOINT: &str = "TON_ENDPOINT";

/// Environment variable overriding the API key.
pub const ENV_API_KEY: &str = "TON_API_KEY";

/// Environment variable overriding the wallet address.
pub const ENV_WALLET_ADDRESS: &str = "TON_WALLET_ADDRESS";

/// Environment variable overriding the wallet secret key.
pub const ENV_WALLET_SECRET: &str = "TON_WALLET_SECRET";
