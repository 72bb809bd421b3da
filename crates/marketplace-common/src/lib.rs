//! # Marketplace Common
//!
//! Shared plumbing for the marketplace client crates: tracing initialisation
//! for binaries and a figment-backed configuration loader.

pub mod config;
pub mod logging;

pub use config::{ConfigLoader, ConfigurationError};
