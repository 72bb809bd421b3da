//! Unified logging initialization for marketplace binaries
//!
//! Filter priority:
//! 1. CLI flags (`-v/-q`) - highest priority
//! 2. RUST_LOG environment variable
//! 3. Binary-specific defaults - lowest priority

use anyhow::Result;
use clap_verbosity_flag::{Level, LogLevel, Verbosity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with the specified verbosity level and default filter.
///
/// # Example
///
/// ```no_run
/// use clap_verbosity_flag::{Verbosity, WarnLevel};
/// use marketplace_common::logging;
///
/// let verbosity = Verbosity::<WarnLevel>::default();
/// logging::init_logging(&verbosity, "market=warn,marketplace_sdk=warn").unwrap();
/// ```
pub fn init_logging<L: LogLevel>(verbosity: &Verbosity<L>, default_filter: &str) -> Result<()> {
    let filter = build_filter(verbosity.is_present(), verbosity.log_level(), default_filter)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

/// Initialize logging only when the user asked for it
///
/// Returns `true` if a subscriber was installed.
pub fn init_cli_logging<L: LogLevel>(
    verbosity: &Verbosity<L>,
    default_filter: &str,
) -> Result<bool> {
    if verbosity.is_present() || std::env::var("RUST_LOG").is_ok() {
        init_logging(verbosity, default_filter)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

fn build_filter(
    flags_present: bool,
    level: Option<Level>,
    default_filter: &str,
) -> Result<EnvFilter> {
    if flags_present {
        return Ok(EnvFilter::try_new(verbosity_directive(level))?);
    }

    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
}

/// `-qqq` and friends map to no level at all
fn verbosity_directive(level: Option<Level>) -> String {
    level.map_or_else(|| "off".to_string(), |l| l.as_str().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directive() {
        assert_eq!(verbosity_directive(Some(Level::Debug)), "debug");
        assert_eq!(verbosity_directive(Some(Level::Warn)), "warn");
        assert_eq!(verbosity_directive(None), "off");
    }

    #[test]
    fn test_flags_build_valid_filter() {
        assert!(build_filter(true, Some(Level::Trace), "market=warn").is_ok());
        assert!(build_filter(true, None, "market=warn").is_ok());
    }
}
