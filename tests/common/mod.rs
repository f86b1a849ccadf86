#![allow(dead_code)]

use std::time::Duration;

use poe_reciper::client::{build_http_client, PoeClient, ResponseCache, SessionAuth};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT: &str = "Exile#1234";
pub const REALM: &str = "pc";
pub const LEAGUE: &str = "Standard";
pub const SESSION: &str = "test-session";

pub const CHARACTERS_PATH: &str = "/character-window/get-characters";
pub const ITEMS_PATH: &str = "/character-window/get-items";
pub const STASH_PATH: &str = "/character-window/get-stash-items";

/// A client pointed at a mock server with its own throwaway cache directory.
pub struct TestEnvironment {
    pub server: MockServer,
    pub cache_dir: TempDir,
    pub client: PoeClient,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        Self::with_timing(Duration::ZERO, Duration::from_secs(5)).await
    }

    pub async fn with_timing(request_delay: Duration, timeout: Duration) -> Self {
        let server = MockServer::start().await;
        let cache_dir = tempfile::tempdir().expect("Failed to create cache dir");
        let client = PoeClient::new(
            build_http_client(timeout).expect("Failed to build HTTP client"),
            server.uri(),
            SessionAuth::new(SESSION.to_string()),
            ResponseCache::new(cache_dir.path(), Duration::from_secs(300)),
            request_delay,
        );
        Self {
            server,
            cache_dir,
            client,
        }
    }

    pub fn cached_files(&self) -> usize {
        std::fs::read_dir(self.cache_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn character(name: &str, league: &str) -> Value {
    json!({ "name": name, "league": league, "class": "Ranger", "level": 90 })
}

pub fn item(type_line: &str, inventory_id: &str) -> Value {
    json!({ "typeLine": type_line, "frameType": 0, "inventoryId": inventory_id })
}

pub fn flask(type_line: &str, quality: &str, frame_type: u8, inventory_id: &str) -> Value {
    json!({
        "typeLine": type_line,
        "frameType": frame_type,
        "inventoryId": inventory_id,
        "properties": [
            { "name": "Quality", "values": [[quality, 1]], "displayMode": 0, "type": 6 }
        ]
    })
}

pub fn tab(index: u32, name: &str) -> Value {
    json!({ "n": name, "i": index, "id": format!("tab{index}"), "type": "NormalStash" })
}

pub async fn mount_characters(server: &MockServer, characters: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("accountName", ACCOUNT))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(characters)))
        .mount(server)
        .await;
}

pub async fn mount_inventory(server: &MockServer, character: &str, items: Vec<Value>, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(ITEMS_PATH))
        .and(query_param("character", character))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_tab_list(server: &MockServer, tabs: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(STASH_PATH))
        .and(query_param("league", LEAGUE))
        .and(query_param("tabs", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numTabs": tabs.len(),
            "tabs": tabs,
            "items": []
        })))
        .mount(server)
        .await;
}

pub async fn mount_tab_items(server: &MockServer, index: u32, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(STASH_PATH))
        .and(query_param("tabs", "0"))
        .and(query_param("tabIndex", index.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("poe_reciper=debug")
        .with_test_writer()
        .try_init();
}
