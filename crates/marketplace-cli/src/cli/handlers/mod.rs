//! Command handlers for the marketplace CLI

pub mod auth;
pub mod catalog;
pub mod config;
pub mod request;
pub mod shopping;
