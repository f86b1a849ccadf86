//! Error types shared by every stage of a run.
//!
//! Nothing here is retried: any variant returned from the client, the
//! aggregator or a recipe aborts the run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// One or more required environment variables are unset or blank.
    #[error("missing required configuration: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    #[error("invalid value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Non-200 status, embedded API error, timeout or transport failure.
    #[error("request to {url} failed: {message}")]
    RequestFailed {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("unexpected response shape from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A flask carries a Quality property with no integer in it.
    #[error("could not parse quality {value:?} of item {type_line:?}")]
    ParseFailure { type_line: String, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to write cache file {path}: {source}")]
    CacheWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
