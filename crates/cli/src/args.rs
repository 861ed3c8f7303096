use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ton_config::{ConfigResult, NetworkType, ScriptConfig};

/// Command-line arguments for the HelloWorld scripts
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hello-world",
    version = crate::VERSION,
    about = "Deploy and read the HelloWorld greeting contract on TON"
)]
pub struct Cli {
    /// Specifies the config file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Network to connect to
    #[arg(long = "network", value_enum, global = true)]
    pub network: Option<Network>,

    /// RPC endpoint, overriding the network default
    #[arg(long = "endpoint", value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Toncenter API key
    #[arg(long = "api-key", value_name = "KEY", global = true)]
    pub api_key: Option<String>,

    /// The verbose log level
    #[arg(long = "verbose", value_enum, default_value = "info", global = true)]
    pub verbose: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Deploy a HelloWorld contract through the configured wallet
    Deploy(DeployArgs),
    /// Read the greeting stored in a deployed contract
    ReadGreeting(ReadGreetingArgs),
    /// Print the address a deployment would use, without touching the network
    Address(AddressArgs),
}

/// Arguments of `deploy`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployArgs {
    /// Greeting to store
    #[arg(long, value_name = "TEXT")]
    pub greeting: Option<String>,

    /// Value to attach, in TON
    #[arg(long, value_name = "TON")]
    pub value: Option<String>,
}

/// Arguments of `read-greeting`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadGreetingArgs {
    /// Contract address, raw or user-friendly
    #[arg(long, value_name = "ADDRESS")]
    pub address: Option<String>,
}

/// Arguments of `address`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressArgs {
    /// Greeting the contract would be deployed with
    #[arg(long, value_name = "TEXT")]
    pub greeting: Option<String>,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Network enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// MainNet network
    Mainnet,
    /// TestNet network
    Testnet,
}

impl From<Network> for NetworkType {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => NetworkType::Mainnet,
            Network::Testnet => NetworkType::Testnet,
        }
    }
}

impl Cli {
    /// Loads the configuration file and applies environment and flag
    /// overrides, in that order.
    pub fn load_config(&self) -> ConfigResult<ScriptConfig> {
        let mut config = ScriptConfig::load_or_default(self.config.as_deref())?;
        config.apply_env();
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn apply_overrides(&self, config: &mut ScriptConfig) {
        if let Some(network) = self.network {
            config.network.network_type = network.into();
        }
        if let Some(endpoint) = &self.endpoint {
            config.network.endpoint = Some(endpoint.clone());
        }
        if let Some(api_key) = &self.api_key {
            config.network.api_key = Some(api_key.clone());
        }
        match &self.command {
            Command::Deploy(args) => {
                if let Some(greeting) = &args.greeting {
                    config.contract.greeting = greeting.clone();
                }
                if let Some(value) = &args.value {
                    config.contract.deploy_value = value.clone();
                }
            }
            Command::ReadGreeting(args) => {
                if let Some(address) = &args.address {
                    config.contract.read_address = address.clone();
                }
            }
            Command::Address(args) => {
                if let Some(greeting) = &args.greeting {
                    config.contract.greeting = greeting.clone();
                }
            }
        }
    }
}
