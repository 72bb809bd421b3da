//! # Marketplace SDK
//!
//! Authenticated client for the marketplace backend API.
//!
//! The interesting part is [`MarketplaceClient::request`]: bearer tokens
//! come from an injectable [`Session`], an expired token is refreshed once
//! for all concurrent callers, and every failure is an [`ApiClientError`].
//! The endpoint wrappers (catalog, cart, orders, favorites, reviews,
//! vendor) are thin methods on the same client.

mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod flight;
pub mod types;

pub use auth::{
    AuthUser, Credential, FileSessionStore, LoginRequest, MemorySessionStore, RegisterRequest,
    Session, SessionPersistence, UserRole,
};
pub use client::{ClientBuilder, FormPayload, MarketplaceClient, RequestBody, RequestOptions};
pub use config::{resolve_base_url, ClientConfig, API_URL_ENV, DEFAULT_API_URL};
pub use error::{ApiClientError, Result, NETWORK_ERROR_STATUS};
pub use types::*;
