use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The configuration could not be written as TOML.
    #[error("Failed to serialize configuration: {message}")]
    Serialize {
        /// Serializer message.
        message: String,
    },

    /// A value is present but unusable.
    #[error("Invalid value for {field}: {message}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// A required value is absent from every source.
    #[error("Missing value for {field}; set it in the config file or via {env}")]
    Missing {
        /// Missing field.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
