//! Run configuration sourced from environment variables.
//!
//! [`Settings`] is built once at startup and handed by reference to the
//! client, the aggregator and the runner. `main` loads an optional `.env`
//! file through `dotenvy` before calling [`Settings::from_env`].

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_REALM: &str = "pc";
pub const DEFAULT_LEAGUE: &str = "Standard";
pub const DEFAULT_BASE_URL: &str = "https://www.pathofexile.com";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_CACHE_LIFE_MS: u64 = 5 * 60 * 1000;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 1000;

/// Immutable settings for a single run.
#[derive(Clone)]
pub struct Settings {
    pub account_name: String,
    pub session_id: String,
    pub realm: String,
    pub league: String,
    /// Recipe names as configured; unrecognized names are skipped by the runner.
    pub enabled_recipes: Vec<String>,
    pub cache_life: Duration,
    pub cache_dir: PathBuf,
    pub base_url: String,
    /// Minimum spacing enforced before every uncached request.
    pub request_delay: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("account_name", &self.account_name)
            .field("session_id", &"<redacted>")
            .field("realm", &self.realm)
            .field("league", &self.league)
            .field("enabled_recipes", &self.enabled_recipes)
            .field("cache_life", &self.cache_life)
            .field("cache_dir", &self.cache_dir)
            .field("base_url", &self.base_url)
            .field("request_delay", &self.request_delay)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let account_name = get("ACCOUNT_NAME");
        let session_id = get("POESESSID");

        let (account_name, session_id) = match (account_name, session_id) {
            (Some(account), Some(session)) => (account, session),
            (account, session) => {
                let mut missing = Vec::new();
                if account.is_none() {
                    missing.push("ACCOUNT_NAME");
                }
                if session.is_none() {
                    missing.push("POESESSID");
                }
                return Err(Error::ConfigurationMissing(missing));
            }
        };

        let mut enabled_recipes = Vec::new();
        if get("GLASSBLOWERS_BAUBLE_ENABLED").is_some_and(|v| parse_flag(&v)) {
            enabled_recipes.push("glassblowers_bauble".to_string());
        }
        if let Some(list) = get("RECIPES") {
            for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                if !enabled_recipes.iter().any(|existing| existing == name) {
                    enabled_recipes.push(name.to_string());
                }
            }
        }

        Ok(Self {
            account_name,
            session_id,
            realm: get("REALM").unwrap_or_else(|| DEFAULT_REALM.to_string()),
            league: get("LEAGUE").unwrap_or_else(|| DEFAULT_LEAGUE.to_string()),
            enabled_recipes,
            cache_life: millis(&get, "CACHE_LIFE", DEFAULT_CACHE_LIFE_MS)?,
            cache_dir: get("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_cache_dir),
            base_url: get("POE_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_delay: millis(&get, "REQUEST_DELAY_MS", DEFAULT_REQUEST_DELAY_MS)?,
            request_timeout: millis(&get, "REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?,
        })
    }
}

/// `cache/` next to the running executable, or relative to the working
/// directory when the executable path cannot be resolved.
pub fn default_cache_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CACHE_DIR)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn millis<G>(get: &G, field: &'static str, default: u64) -> Result<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    match get(field) {
        None => Ok(Duration::from_millis(default)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| Error::InvalidConfig {
                field,
                reason: format!("{raw:?} is not a millisecond count ({e})"),
            }),
    }
}
