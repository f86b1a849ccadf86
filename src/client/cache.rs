//! On-disk cache of raw API responses.
//!
//! One JSON file per request URL, named by the SHA-256 of the URL, holding
//! `{"lastUpdated": <epoch ms>, "data": <payload>}`. Entries older than the
//! configured lifetime are treated as absent. Unreadable or malformed files
//! are also a miss: the cache only saves requests, it is never the source of
//! truth.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    last_updated: i64,
    data: Value,
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    lifetime: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl AsRef<Path>, lifetime: Duration) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            lifetime,
        }
    }

    /// Hex SHA-256 of the exact request URL, query string included.
    pub fn key_for(url: &str) -> String {
        hex::encode(Sha256::digest(url.as_bytes()))
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", Self::key_for(url)))
    }

    pub async fn get(&self, url: &str) -> Option<Value> {
        self.get_at(url, Utc::now()).await
    }

    /// Returns the payload stored for `url` if it is younger than the lifetime at `now`.
    pub async fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<Value> {
        let path = self.path_for(url);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache file {}: {}", path.display(), e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&contents) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Ignoring malformed cache file {}: {}", path.display(), e);
                return None;
            }
        };

        let age_ms = now.timestamp_millis() - entry.last_updated;
        if age_ms < self.lifetime.as_millis() as i64 {
            Some(entry.data)
        } else {
            tracing::debug!("Cache entry for {} expired {}ms ago", url, age_ms);
            None
        }
    }

    pub async fn put(&self, url: &str, payload: &Value) -> Result<()> {
        self.put_at(url, payload, Utc::now()).await
    }

    /// Stores `payload` for `url` stamped with `now`, replacing any prior entry.
    pub async fn put_at(&self, url: &str, payload: &Value, now: DateTime<Utc>) -> Result<()> {
        let path = self.path_for(url);
        let write_error = |source| Error::CacheWrite {
            path: path.display().to_string(),
            source,
        };

        let entry = CacheEntry {
            last_updated: now.timestamp_millis(),
            data: payload.clone(),
        };
        let body = serde_json::to_string_pretty(&entry)
            .map_err(|e| write_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(write_error)?;
        tokio::fs::write(&path, body).await.map_err(write_error)?;
        tracing::debug!("Cached response for {} at {}", url, path.display());
        Ok(())
    }
}
