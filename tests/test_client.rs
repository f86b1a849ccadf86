mod common;

use std::time::{Duration, Instant};

use common::*;
use poe_reciper::client::client::USER_AGENT;
use poe_reciper::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_cached_url_is_fetched_once() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([character("Runner", LEAGUE)])))
        .expect(1)
        .mount(&env.server)
        .await;

    let first = env.client.fetch_characters(ACCOUNT, REALM).await.unwrap();
    let second = env.client.fetch_characters(ACCOUNT, REALM).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].name, "Runner");
    assert_eq!(env.cached_files(), 1);
}

#[tokio::test]
async fn test_uncached_request_waits_for_delay() {
    common::init_test_logging();
    let delay = Duration::from_millis(150);
    let env = TestEnvironment::with_timing(delay, Duration::from_secs(5)).await;
    mount_characters(&env.server, vec![]).await;

    let started = Instant::now();
    env.client.fetch_characters(ACCOUNT, REALM).await.unwrap();

    assert!(started.elapsed() >= delay, "uncached request returned before the delay");
}

#[tokio::test]
async fn test_session_cookie_and_user_agent_are_sent() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .and(query_param("accountName", ACCOUNT))
        .and(query_param("realm", REALM))
        .and(header("cookie", format!("POESESSID={SESSION}").as_str()))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&env.server)
        .await;

    let characters = env.client.fetch_characters(ACCOUNT, REALM).await.unwrap();
    assert!(characters.is_empty());
}

#[tokio::test]
async fn test_embedded_error_fails_and_is_not_cached() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path(ITEMS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 1, "message": "Resource not found" }
        })))
        .expect(2)
        .mount(&env.server)
        .await;

    for _ in 0..2 {
        let err = env
            .client
            .fetch_character_inventory(ACCOUNT, REALM, "Runner")
            .await
            .unwrap_err();
        match err {
            Error::RequestFailed { url, status, message } => {
                assert!(url.contains("character=Runner"));
                assert_eq!(status, Some(200));
                assert_eq!(message, "Resource not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(env.cached_files(), 0);
}

#[tokio::test]
async fn test_non_success_status_fails() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 6, "message": "Forbidden" }
        })))
        .mount(&env.server)
        .await;

    let err = env.client.fetch_characters(ACCOUNT, REALM).await.unwrap_err();
    assert!(
        matches!(err, Error::RequestFailed { status: Some(403), ref message, .. } if message == "Forbidden"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_plain_text_error_body_is_reported() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&env.server)
        .await;

    let err = env.client.fetch_characters(ACCOUNT, REALM).await.unwrap_err();
    assert!(err.to_string().contains("maintenance"), "unexpected error: {err}");
}

#[tokio::test]
async fn test_timeout_is_a_request_failure() {
    common::init_test_logging();
    let env = TestEnvironment::with_timing(Duration::ZERO, Duration::from_millis(50)).await;

    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&env.server)
        .await;

    let err = env.client.fetch_characters(ACCOUNT, REALM).await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed { status: None, .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn test_stash_list_and_tab_items_use_separate_requests() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    mount_tab_list(&env.server, vec![tab(0, "Flasks"), tab(1, "Dump")]).await;
    mount_tab_items(&env.server, 0, vec![flask("Granite Flask", "+20%", 0, "Stash1")]).await;

    let tabs = env.client.fetch_stash_tab_list(ACCOUNT, REALM, LEAGUE).await.unwrap();
    let items = env.client.fetch_stash_tab_items(ACCOUNT, REALM, LEAGUE, 0).await.unwrap();

    assert_eq!(tabs.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["Flasks", "Dump"]);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].type_line, "Granite Flask");
    assert_eq!(env.cached_files(), 2);
}

#[tokio::test]
async fn test_unexpected_shape_is_invalid_response() {
    common::init_test_logging();
    let env = TestEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path(CHARACTERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "characters": [] })))
        .mount(&env.server)
        .await;

    let err = env.client.fetch_characters(ACCOUNT, REALM).await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse { .. }), "unexpected error: {err}");
}
