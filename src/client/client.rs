use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{
    auth::SessionAuth,
    cache::ResponseCache,
    types::*,
};
use crate::config::Settings;
use crate::error::{Error, Result};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("poe-reciper/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by every request of a run.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::HttpClient)
}

pub struct PoeClient {
    base_url: String,
    client: Client,
    auth: SessionAuth,
    cache: ResponseCache,
    request_delay: Duration,
}

impl PoeClient {
    pub fn new(
        client: Client,
        base_url: String,
        auth: SessionAuth,
        cache: ResponseCache,
        request_delay: Duration,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            auth,
            cache,
            request_delay,
        }
    }

    pub fn from_settings(client: Client, settings: &Settings) -> Self {
        Self::new(
            client,
            settings.base_url.clone(),
            SessionAuth::new(settings.session_id.clone()),
            ResponseCache::new(&settings.cache_dir, settings.cache_life),
            settings.request_delay,
        )
    }

    // Character operations
    pub async fn fetch_characters(&self, account: &str, realm: &str) -> Result<Vec<Character>> {
        let url = format!(
            "{}/character-window/get-characters?accountName={}&realm={}",
            self.base_url,
            urlencoding::encode(account),
            urlencoding::encode(realm),
        );
        self.get(&url).await
    }

    pub async fn fetch_character_inventory(
        &self,
        account: &str,
        realm: &str,
        character: &str,
    ) -> Result<Vec<Item>> {
        let url = format!(
            "{}/character-window/get-items?accountName={}&realm={}&character={}",
            self.base_url,
            urlencoding::encode(account),
            urlencoding::encode(realm),
            urlencoding::encode(character),
        );
        let response: CharacterItems = self.get(&url).await?;
        Ok(response.items)
    }

    // Stash operations
    pub async fn fetch_stash_tab_list(
        &self,
        account: &str,
        realm: &str,
        league: &str,
    ) -> Result<Vec<StashTab>> {
        let url = self.stash_url(account, realm, league, true, 0);
        let response: StashItems = self.get(&url).await?;
        Ok(response.tabs)
    }

    pub async fn fetch_stash_tab_items(
        &self,
        account: &str,
        realm: &str,
        league: &str,
        tab_index: u32,
    ) -> Result<Vec<Item>> {
        let url = self.stash_url(account, realm, league, false, tab_index);
        let response: StashItems = self.get(&url).await?;
        Ok(response.items)
    }

    fn stash_url(&self, account: &str, realm: &str, league: &str, tabs: bool, tab_index: u32) -> String {
        format!(
            "{}/character-window/get-stash-items?accountName={}&realm={}&league={}&tabs={}&tabIndex={}",
            self.base_url,
            urlencoding::encode(account),
            urlencoding::encode(realm),
            urlencoding::encode(league),
            u8::from(tabs),
            tab_index,
        )
    }

    /// Cached GET. A hit returns without touching the network; a miss waits
    /// the request delay, fetches, and caches only successful payloads.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let payload = match self.cache.get(url).await {
            Some(cached) => {
                tracing::debug!("Cache hit for {}", url);
                cached
            }
            None => {
                tracing::debug!("Cache miss for {}", url);
                let fetched = self.fetch(url).await?;
                if let Err(e) = self.cache.put(url, &fetched).await {
                    tracing::warn!("Could not cache response: {}", e);
                }
                fetched
            }
        };

        serde_json::from_value(payload).map_err(|source| Error::InvalidResponse {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch(&self, url: &str) -> Result<Value> {
        tokio::time::sleep(self.request_delay).await;

        tracing::debug!(
            "Requesting {} with session {}",
            url,
            self.auth.preview()
        );

        let request_failed = |status: Option<u16>, message: String| Error::RequestFailed {
            url: url.to_string(),
            status,
            message,
        };

        let response = self
            .client
            .get(url)
            .header(reqwest::header::COOKIE, self.auth.cookie_header())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error requesting {}: {}", url, e);
                request_failed(None, e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            request_failed(Some(status.as_u16()), e.to_string())
        })?;

        if status != reqwest::StatusCode::OK {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| embedded_error(&v))
                .unwrap_or_else(|| format!("status {}: {}", status, body.trim()));
            tracing::error!("Request to {} failed with status {}: {}", url, status, message);
            return Err(request_failed(Some(status.as_u16()), message));
        }

        let payload: Value = serde_json::from_str(&body).map_err(|source| Error::InvalidResponse {
            url: url.to_string(),
            source,
        })?;

        if let Some(message) = embedded_error(&payload) {
            tracing::error!("API reported an error for {}: {}", url, message);
            return Err(request_failed(Some(status.as_u16()), message));
        }

        Ok(payload)
    }
}

/// Extracts the message of an `{"error": {...}}` body, if present.
fn embedded_error(payload: &Value) -> Option<String> {
    let error = payload.as_object()?.get("error").filter(|e| !e.is_null())?;
    let message = match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    };
    Some(message)
}
