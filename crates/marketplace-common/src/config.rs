//! Layered configuration loading
//!
//! Every configuration struct in the workspace is resolved the same way:
//! compiled-in defaults, then a TOML file, then prefixed environment
//! variables (nested keys separated by `__`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The merged configuration could not be extracted into the target type
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },
}

/// Loader for configuration structs backed by figment
pub trait ConfigLoader: Serialize + DeserializeOwned + Default {
    /// Environment variable prefix, including the trailing underscore
    const ENV_PREFIX: &'static str;

    /// File consulted when no explicit path is given
    const DEFAULT_FILE: &'static str;

    /// Build the figment for the given file without extracting it
    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
    }

    /// Load configuration from the given file (or the default file) and environment
    fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE));

        Self::figment(&path)
            .extract()
            .map_err(|e| ConfigurationError::ParseError {
                details: e.to_string(),
            })
    }

    /// Render the defaults as a TOML document
    fn generate_example() -> Result<String, ConfigurationError> {
        toml::to_string_pretty(&Self::default()).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }
}
