//! Main entry point for the marketplace CLI

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use marketplace_cli::cli::Args;
use marketplace_cli::output::print_info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep reports short; file locations mean nothing to shoppers
    color_eyre::config::HookBuilder::default()
        .display_location_section(false)
        .display_env_section(false)
        .install()?;

    let binary_name = env!("CARGO_BIN_NAME").replace('-', "_");
    let default_filter = format!("{binary_name}=warn,marketplace_cli=warn,marketplace_sdk=warn");
    marketplace_common::logging::init_cli_logging(&args.verbosity, &default_filter)
        .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

    if let Err(err) = args.run().await {
        if let Some(suggestion) = err.suggestion() {
            print_info(suggestion);
        }
        return Err(err.into());
    }
    Ok(())
}
