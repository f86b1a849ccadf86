//! # poe-reciper
//!
//! Reads a Path of Exile account's character inventories and stash tabs
//! through the character-window API and looks for vendor recipe matches.
//!
//! ## Client Module
//!
//! The [`client`] module wraps the four character-window endpoints behind a
//! session-cookie client with an on-disk response cache and a fixed delay
//! before every uncached request.
//!
//! ## Recipes Module
//!
//! The [`recipes`] module scans the aggregated items. The only recipe is the
//! Glassblower's Bauble: flasks whose quality sums to 40%, or a lone normal
//! flask at 20%.
//!
//! ## Quick Start
//!
//! ```no_run
//! use poe_reciper::{config::Settings, runner};
//!
//! # async fn example() -> poe_reciper::Result<()> {
//! let settings = Settings::from_env()?;
//! for (recipe, outcome) in runner::run(&settings).await? {
//!     println!("{recipe}: {outcome:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod recipes;
pub mod runner;

pub use client::PoeClient;
pub use error::{Error, Result};
