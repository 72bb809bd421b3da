//! Configuration command handlers

use crate::cli::commands::ConfigAction;
use crate::config::{expand_tilde, CliConfig};
use crate::error::Result;
use crate::output::{json_output, print_info};
use marketplace_common::ConfigLoader;
use marketplace_sdk::config::base_url_from_env;
use std::path::Path;

pub fn handle_config(
    action: ConfigAction,
    config: &CliConfig,
    config_path: &Path,
    json: bool,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if json {
                return json_output(config);
            }

            let path = expand_tilde(config_path);
            if path.exists() {
                print_info(&format!("Configuration file: {}", path.display()));
            } else {
                print_info(&format!(
                    "No configuration file at {}, showing defaults and environment",
                    path.display()
                ));
            }
            println!("{}", render_config(config, &path)?);
            Ok(())
        }
    }
}

/// Effective settings, plus a starter file when none exists at `path`
fn render_config(config: &CliConfig, path: &Path) -> Result<String> {
    let api_url = match config.api.api_url {
        Some(_) => config.api.base_url(),
        None => base_url_from_env(),
    };

    let mut out = format!("API URL: {api_url}\n\n{}", config.to_toml()?);
    if !path.exists() {
        out.push_str(&format!(
            "\n# Example {}:\n{}",
            path.display(),
            CliConfig::generate_example()?
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_sdk::ClientConfig;

    fn configured() -> CliConfig {
        CliConfig {
            api: ClientConfig {
                api_url: Some("shop.example.com/".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_render_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let rendered = render_config(&configured(), file.path()).unwrap();

        assert!(rendered.starts_with("API URL: http://shop.example.com\n"));
        assert!(rendered.contains("api_url = \"shop.example.com/\""));
        assert!(!rendered.contains("# Example"));
    }

    #[test]
    fn test_render_missing_file_adds_example() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let rendered = render_config(&configured(), &path).unwrap();

        let example = rendered.split("# Example").nth(1).unwrap();
        assert!(example.contains("config.toml"));
        assert!(example.contains("[output]"));
        assert!(example.contains("json = false"));
    }
}
