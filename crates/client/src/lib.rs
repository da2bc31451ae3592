//! HTTP access layer for the Lumera jewelry-store admin backend.
//!
//! [`ApiClient`] is the entry point. It owns the session (tokens plus the
//! signed-in admin, persisted across restarts), a query cache with staleness
//! and group invalidation, and the typed endpoint bindings. Every request
//! carries the current access token; a 401 triggers one transparent token
//! refresh and retry, and a failed refresh signs the session out.
//!
//! Typical use goes through the cached facades, one per resource:
//!
//! ```no_run
//! use lumera_client::{ApiClient, ApiConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::from_env()?;
//! let client = ApiClient::new(&config)?;
//! client.initialize()?;
//! let pending = client.contacts().unread_count().await?;
//! println!("unread messages: {}", pending.count);
//! # Ok(())
//! # }
//! ```
//!
//! The raw, uncached endpoint bindings stay reachable through
//! [`ApiClient::api`] for callers that manage freshness themselves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
mod http;
pub mod queries;
pub mod session;

pub use api::types::*;
pub use config::{ApiConfig, ConfigError};
pub use lumera_core::{
    AdminId, CategoryId, ContactId, CustomerId, FavoriteId, OrderId, Page, ProductId, ReviewId,
    SortOrder, VoucherId,
};
pub use error::{ApiError, ApiResult};
pub use http::ApiClient;
pub use session::SessionStore;
