//! Configuration management for the marketplace CLI

use crate::error::{CliError, Result};
use etcetera::{choose_base_strategy, BaseStrategy};
use marketplace_common::ConfigLoader;
use marketplace_sdk::{ClientBuilder, ClientConfig, MarketplaceClient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the CLI configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.marketplace/config.toml";

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection settings, shared with the SDK
    #[serde(default)]
    pub api: ClientConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print JSON even without `--json`
    #[serde(default)]
    pub json: bool,
}

impl ConfigLoader for CliConfig {
    const ENV_PREFIX: &'static str = "MARKETPLACE_CLI_";
    const DEFAULT_FILE: &'static str = DEFAULT_CONFIG_PATH;
}

impl CliConfig {
    /// Load the configuration file at `path` (tilde allowed) plus environment overrides
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: &Path) -> Result<Self> {
        let path = expand_tilde(path);
        debug!("Loading CLI configuration from {}", path.display());
        Ok(<Self as ConfigLoader>::load(Some(&path))?)
    }

    /// Client for this configuration with the persisted session loaded
    pub async fn client(&self) -> Result<MarketplaceClient> {
        let mut api = self.api.clone();
        api.session_file = api.session_file.as_deref().map(expand_tilde);

        let client = ClientBuilder::from_config(&api)?.build_restored().await?;
        debug!(
            base_url = client.base_url(),
            authenticated = client.session().is_authenticated(),
            "Client ready"
        );
        Ok(client)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::invalid_argument(format!("Failed to render config: {e}")))
    }
}

/// Expand tilde (~) in file paths to home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Ok(strategy) = choose_base_strategy() {
            return strategy.home_dir().join(rest);
        }
    }
    path.to_path_buf()
}
