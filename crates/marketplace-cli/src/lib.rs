//! # Marketplace CLI
//!
//! Command-line front end for the marketplace backend, built on
//! `marketplace-sdk`. The session is kept on disk between invocations, so
//! `market login` once and later commands reuse (and silently refresh) the
//! access token.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use cli::*;
pub use error::*;
