//! End-to-end tests for the fetch → validate → publish → cache flow.

use std::fs;
use std::sync::Arc;

use external_config::config::schema;
use external_config::{
    ConfigService, FeatureFlag, FetchOutcome, HostPurpose, InMemoryOverrides, ServiceSettings, ValueKey,
};
use tempfile::TempDir;
use tokio::sync::mpsc;

mod common;

fn service_in(dir: &TempDir) -> (Arc<ConfigService>, Arc<InMemoryOverrides>) {
    let mut settings = ServiceSettings::new(dir.path());
    settings.develop_overrides = false;
    let sink = Arc::new(InMemoryOverrides::new());
    (ConfigService::new(settings, sink.clone()), sink)
}

fn doc_url(addr: std::net::SocketAddr) -> String {
    format!("http://{addr}/{}", schema::CONFIG_DOC_NAME)
}

#[tokio::test]
async fn test_fetch_ok_publishes_and_caches() {
    let body = common::sample_document();
    let addr = common::start_mock_backend(200, body.clone()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, sink) = service_in(&dir);

    let outcome = service.fetch(&doc_url(addr)).await;
    assert_eq!(outcome, FetchOutcome::Ok);

    assert!(service.is_valid());
    assert_eq!(service.host(HostPurpose::Api), Some("api.example.com".to_string()));
    assert_eq!(service.host(HostPurpose::DesignSystem), Some("design.example.com".to_string()));
    assert_eq!(service.vcs_rooms(), ["a.example.com", "b.example.com"]);

    assert_eq!(sink.feature(FeatureFlag::Threads), Some(true));
    assert_eq!(sink.feature(FeatureFlag::SmartReplyQuoteSuggestions), Some(true));
    assert_eq!(sink.value(ValueKey::StatusBannerEmoji), Some("☕;🌙".to_string()));

    let cached = fs::read(dir.path().join(schema::CONFIG_DOC_NAME)).unwrap();
    assert_eq!(cached, body.as_bytes());
}

#[tokio::test]
async fn test_fetch_404_leaves_store_and_disk_untouched() {
    let addr = common::start_mock_backend(404, "not here".to_string()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, sink) = service_in(&dir);

    let outcome = service.fetch(&doc_url(addr)).await;
    assert_eq!(outcome, FetchOutcome::InvalidHttpCode);

    assert!(!service.is_valid());
    assert!(sink.is_empty());
    assert!(!dir.path().join(schema::CONFIG_DOC_NAME).exists());
}

#[tokio::test]
async fn test_fetch_empty_body() {
    let addr = common::start_mock_backend(200, String::new()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);

    assert_eq!(service.fetch(&doc_url(addr)).await, FetchOutcome::EmptyResponse);
    assert!(!service.is_valid());
}

#[tokio::test]
async fn test_fetch_invalid_json() {
    let addr = common::start_mock_backend(200, "{ not json".to_string()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);

    assert_eq!(service.fetch(&doc_url(addr)).await, FetchOutcome::AnswerParseError);
    assert!(!service.is_valid());
    assert!(!dir.path().join(schema::CONFIG_DOC_NAME).exists());
}

#[tokio::test]
async fn test_fetch_not_enough_fields() {
    let body = serde_json::json!({
        "api-urls": { "main-api": "api.example.com" }
    })
    .to_string();
    let addr = common::start_mock_backend(200, body).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);

    assert_eq!(service.fetch(&doc_url(addr)).await, FetchOutcome::AnswerNotEnoughFields);
    assert!(!service.is_valid());
    assert!(!dir.path().join(schema::CONFIG_DOC_NAME).exists());
}

#[tokio::test]
async fn test_fetch_empty_url_never_touches_network() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);

    assert_eq!(service.fetch("").await, FetchOutcome::ConfigHostInvalid);
    assert_eq!(service.fetch("   ").await, FetchOutcome::ConfigHostInvalid);
    assert!(!service.is_valid());
}

#[tokio::test]
async fn test_failed_fetch_preserves_previous_snapshot() {
    let good = common::start_mock_backend(200, common::sample_document()).await;
    let bad = common::start_mock_backend(500, "boom".to_string()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);

    assert_eq!(service.fetch(&doc_url(good)).await, FetchOutcome::Ok);
    assert_eq!(service.fetch(&doc_url(bad)).await, FetchOutcome::InvalidHttpCode);

    assert_eq!(service.host(HostPurpose::Api), Some("api.example.com".to_string()));
}

#[tokio::test]
async fn test_cached_document_round_trips_on_restart() {
    let addr = common::start_mock_backend(200, common::sample_document()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);
    assert_eq!(service.fetch(&doc_url(addr)).await, FetchOutcome::Ok);
    let fetched = serde_json::to_value(&*service.store().snapshot().unwrap()).unwrap();

    // Fresh service over the same data directory, as on next startup.
    let (restarted, sink) = service_in(&dir);
    assert!(restarted.load_from_disk());

    let loaded = serde_json::to_value(&*restarted.store().snapshot().unwrap()).unwrap();
    assert_eq!(loaded, fetched);
    assert_eq!(restarted.vcs_rooms(), ["a.example.com", "b.example.com"]);
    assert_eq!(sink.feature(FeatureFlag::SmartReplyQuoteSuggestions), Some(true));
}

#[tokio::test]
async fn test_load_from_disk_without_cache_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);

    assert!(!service.load_from_disk());
    assert!(!service.is_valid());
}

#[tokio::test]
async fn test_load_from_disk_rejects_invalid_cache() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(schema::CONFIG_DOC_NAME), "{ not json").unwrap();

    let (service, _) = service_in(&dir);
    assert!(!service.load_from_disk());
    assert!(!service.is_valid());
}

#[tokio::test]
async fn test_spawn_fetch_delivers_one_event() {
    let addr = common::start_mock_backend(200, common::sample_document()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, _) = service_in(&dir);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let url = doc_url(addr);
    service.spawn_fetch(url.clone(), tx);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.outcome, FetchOutcome::Ok);
    assert_eq!(event.url, url);
    assert!(service.is_valid());

    // Sender side is dropped after the single delivery.
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_develop_override_bypasses_remote_validation() {
    let dir = tempfile::tempdir().unwrap();

    let develop_doc = serde_json::json!({
        "api-urls": {
            "main-api": "develop-api.example.com",
            "main-binary-api": "develop-binary.example.com"
        },
        "templates-urls": {
            "files-parsing": "develop-files.example.com",
            "stickerpack-sharing": "develop-stickers.example.com",
            "profile": "develop-profile.example.com"
        }
    })
    .to_string();
    fs::write(dir.path().join(schema::DEVELOP_CONFIG_DOC_NAME), &develop_doc).unwrap();

    let mut settings = ServiceSettings::new(dir.path());
    settings.develop_overrides = true;
    let service = ConfigService::new(settings, Arc::new(InMemoryOverrides::new()));

    assert!(service.load_from_disk());
    assert!(service.develop_overrides_active());
    assert_eq!(service.host(HostPurpose::Api), Some("develop-api.example.com".to_string()));

    // Remote document would fail validation, but develop mode only persists it.
    let incomplete = serde_json::json!({ "api-urls": {} }).to_string();
    let addr = common::start_mock_backend(200, incomplete.clone()).await;

    assert_eq!(service.fetch(&doc_url(addr)).await, FetchOutcome::Ok);
    assert_eq!(service.host(HostPurpose::Api), Some("develop-api.example.com".to_string()));

    let cached = fs::read(dir.path().join(schema::CONFIG_DOC_NAME)).unwrap();
    assert_eq!(cached, incomplete.as_bytes());
}

#[tokio::test]
async fn test_clear_removes_snapshot_and_cache_file() {
    let addr = common::start_mock_backend(200, common::sample_document()).await;

    let dir = tempfile::tempdir().unwrap();
    let (service, sink) = service_in(&dir);

    assert_eq!(service.fetch(&doc_url(addr)).await, FetchOutcome::Ok);
    assert!(service.is_valid());

    service.clear();

    assert!(!service.is_valid());
    assert!(sink.is_empty());
    assert!(!dir.path().join(schema::CONFIG_DOC_NAME).exists());
    assert!(!service.load_from_disk());
}
