use crate::cli::{commands::Commands, handlers};
use crate::config::{CliConfig, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

/// Marketplace CLI - shop, track orders and poke the API from a terminal
#[derive(Parser, Debug)]
#[command(
    name = "market",
    version,
    about = "Marketplace CLI - shop, track orders and poke the API from a terminal",
    long_about = "Command-line client for the marketplace backend.

QUICK START:
  market login                      # Sign in (prompts for credentials)
  market products --search lamp     # Browse the catalog
  market cart                       # Show your cart
  market orders                     # List your orders

RAW ACCESS:
  market request GET /api/auth/me   # Any endpoint, token attached
  market request POST /api/favorites --data '{\"productId\":\"p-1\"}'

CONFIGURATION:
  market config show                # Effective configuration
  MARKETPLACE_API_URL=api.shop.test market products"
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let config = CliConfig::load_from(&self.config)?;
        let json = self.json || config.output.json;

        // Only commands that talk to the backend open the session store
        match self.command {
            Commands::Config { action } => {
                handlers::config::handle_config(action, &config, &self.config, json)
            }

            Commands::Login { email, password } => {
                handlers::auth::handle_login(&config.client().await?, email, password, json).await
            }
            Commands::Register(options) => {
                handlers::auth::handle_register(&config.client().await?, options, json).await
            }
            Commands::Logout => handlers::auth::handle_logout(&config.client().await?).await,
            Commands::Whoami => handlers::auth::handle_whoami(&config.client().await?, json).await,

            Commands::Products(filters) => {
                handlers::catalog::handle_products(&config.client().await?, filters, json).await
            }
            Commands::Product { id } => {
                handlers::catalog::handle_product(&config.client().await?, &id, json).await
            }

            Commands::Cart => handlers::shopping::handle_cart(&config.client().await?, json).await,
            Commands::Orders => {
                handlers::shopping::handle_orders(&config.client().await?, json).await
            }
            Commands::Order { id } => {
                handlers::shopping::handle_order(&config.client().await?, &id, json).await
            }
            Commands::Favorites => {
                handlers::shopping::handle_favorites(&config.client().await?, json).await
            }

            Commands::Request {
                method,
                path,
                data,
                no_auth,
            } => {
                let client = config.client().await?;
                handlers::request::handle_request(&client, &method, &path, data.as_deref(), no_auth)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{ConfigAction, RoleArg};
    use clap::CommandFactory;
    use serial_test::serial;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_request_command() {
        let args = Args::try_parse_from([
            "market",
            "request",
            "post",
            "api/favorites",
            "--data",
            r#"{"productId":"p-1"}"#,
            "--no-auth",
            "--json",
        ])
        .unwrap();

        assert!(args.json);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        match args.command {
            Commands::Request {
                method,
                path,
                data,
                no_auth,
            } => {
                assert_eq!(method, "post");
                assert_eq!(path, "api/favorites");
                assert_eq!(data.as_deref(), Some(r#"{"productId":"p-1"}"#));
                assert!(no_auth);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_defaults_to_customer() {
        let args =
            Args::try_parse_from(["market", "register", "--email", "a@example.com"]).unwrap();
        match args.command {
            Commands::Register(options) => {
                assert_eq!(options.role, RoleArg::Customer);
                assert_eq!(options.email.as_deref(), Some("a@example.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["market", "config", "show", "-c", "/tmp/m.toml", "-v"]).unwrap();
        assert_eq!(args.config, PathBuf::from("/tmp/m.toml"));
        assert!(args.verbosity.is_present());
        assert!(matches!(
            args.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_config_show_runs_without_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let args = Args::try_parse_from([
            "market",
            "config",
            "show",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();

        args.run().await.unwrap();
        assert!(!path.exists());
    }
}
