//! # Character-window HTTP Client
//!
//! This module provides a rate-limited, cached client for the character-window
//! endpoints: character lists, character inventories, stash tab lists and
//! stash tab contents.
//!
//! ## Modules
//!
//! - [`auth`] - Session cookie handling
//! - [`cache`] - On-disk response cache keyed by request URL
//! - [`client`] - HTTP client with the four retrieval operations
//! - [`types`] - Type definitions for API responses
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use poe_reciper::client::{build_http_client, PoeClient, ResponseCache, SessionAuth};
//!
//! # async fn example() -> poe_reciper::Result<()> {
//! let client = PoeClient::new(
//!     build_http_client(Duration::from_secs(1))?,
//!     "https://www.pathofexile.com".to_string(),
//!     SessionAuth::new("session-id".to_string()),
//!     ResponseCache::new("cache", Duration::from_secs(300)),
//!     Duration::from_secs(1),
//! );
//!
//! let characters = client.fetch_characters("account", "pc").await?;
//! println!("Found {} characters", characters.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cache;
#[allow(clippy::module_inception)]
pub mod client;
pub mod types;

pub use auth::SessionAuth;
pub use cache::ResponseCache;
pub use client::{build_http_client, PoeClient};
pub use types::*;
