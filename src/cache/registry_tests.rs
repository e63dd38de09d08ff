//! Tests for ExpirationRegistry

use super::*;
use crate::error::Error;
use crate::types::{param, RequestIdentity};
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tempfile::tempdir;

fn identity(path: &str, character: i64) -> RequestIdentity {
    RequestIdentity::new(
        "https://api.eveonline.com",
        path,
        vec![
            param("keyID", 7),
            param("vCode", "secret"),
            param("characterID", character),
        ],
    )
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_registry_in_memory() {
    let registry = ExpirationRegistry::in_memory();
    assert!(registry.is_in_memory());
    assert!(registry.path().is_none());
}

#[test]
fn test_registry_persistent() {
    let registry = ExpirationRegistry::persistent("/tmp/evelib-cache.json");
    assert!(!registry.is_in_memory());
    assert_eq!(
        registry.path().and_then(|p| p.to_str()),
        Some("/tmp/evelib-cache.json")
    );
}

// ============================================================================
// Lookup / Upsert Tests
// ============================================================================

#[tokio::test]
async fn test_lookup_unknown_identity() {
    let registry = ExpirationRegistry::in_memory();
    assert!(registry.lookup(&identity("/char/MarketOrders.xml.aspx", 1)).await.is_none());
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_upsert_is_idempotent() {
    let registry = ExpirationRegistry::in_memory();
    let id = identity("/char/MarketOrders.xml.aspx", 1);
    let expires = Utc.with_ymd_and_hms(2014, 3, 5, 18, 0, 0).unwrap();

    registry.upsert(id.clone(), expires).await;
    registry.upsert(id.clone(), expires).await;

    assert_eq!(registry.len().await, 1);
    assert_eq!(registry.lookup(&id).await, Some(expires));
}

#[tokio::test]
async fn test_upsert_replaces_previous_value() {
    let registry = ExpirationRegistry::in_memory();
    let id = identity("/char/MarketOrders.xml.aspx", 1);
    let early = Utc.with_ymd_and_hms(2014, 3, 5, 18, 0, 0).unwrap();
    let late = early + ChronoDuration::hours(1);

    registry.upsert(id.clone(), late).await;
    registry.upsert(id.clone(), early).await;

    assert_eq!(registry.lookup(&id).await, Some(early));
}

#[tokio::test]
async fn test_parameter_order_does_not_matter() {
    let registry = ExpirationRegistry::in_memory();
    let expires = Utc::now();
    registry
        .upsert(identity("/char/WalletTransactions.xml.aspx", 9), expires)
        .await;

    let reordered = RequestIdentity::new(
        "https://api.eveonline.com/",
        "/char/WalletTransactions.xml.aspx",
        vec![
            param("characterID", 9),
            param("vCode", "secret"),
            param("keyID", 7),
        ],
    );
    assert_eq!(registry.lookup(&reordered).await, Some(expires));
}

#[tokio::test]
async fn test_is_fresh() {
    let registry = ExpirationRegistry::in_memory();
    let id = identity("/char/ContractBids.xml.aspx", 1);
    let expires = Utc.with_ymd_and_hms(2014, 3, 5, 18, 0, 0).unwrap();
    registry.upsert(id.clone(), expires).await;

    assert!(registry.is_fresh(&id, expires - ChronoDuration::seconds(1)).await);
    assert!(!registry.is_fresh(&id, expires).await);
    assert!(!registry.is_fresh(&identity("/other", 1), expires).await);
}

#[tokio::test]
async fn test_concurrent_writes_for_distinct_identities() {
    let registry = ExpirationRegistry::in_memory();
    let base = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry
                    .upsert(identity("/char/MarketOrders.xml.aspx", i), base + ChronoDuration::minutes(i))
                    .await;
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(registry.len().await, 32);
    for i in 0..32 {
        assert_eq!(
            registry.lookup(&identity("/char/MarketOrders.xml.aspx", i)).await,
            Some(base + ChronoDuration::minutes(i))
        );
    }
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_in_memory_is_noop() {
    let registry = ExpirationRegistry::in_memory();
    registry.upsert(identity("/a", 1), Utc::now()).await;
    registry.save().await.unwrap();
}

#[tokio::test]
async fn test_save_and_open_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("registry.json");
    let first = Utc.with_ymd_and_hms(2014, 3, 5, 18, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2014, 3, 5, 19, 30, 15).unwrap();

    let registry = ExpirationRegistry::persistent(&path);
    registry.upsert(identity("/char/MarketOrders.xml.aspx", 1), first).await;
    registry.upsert(identity("/char/ContractBids.xml.aspx", 2), second).await;
    registry.save().await.unwrap();

    assert!(path.exists());
    assert!(!dir.path().join("registry.json.tmp").exists());

    let reopened = ExpirationRegistry::open(&path, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(reopened.snapshot().await, registry.snapshot().await);
    assert_eq!(
        reopened.lookup(&identity("/char/ContractBids.xml.aspx", 2)).await,
        Some(second)
    );
}

#[tokio::test]
async fn test_open_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let registry = ExpirationRegistry::open(dir.path().join("absent.json"), Duration::from_secs(1))
        .await
        .unwrap();
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_open_corrupt_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("registry.json");
    std::fs::write(&path, "not json").unwrap();

    let err = ExpirationRegistry::open(&path, Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Registry { .. }));
}

#[tokio::test]
async fn test_open_through_a_file_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let err = ExpirationRegistry::open(blocker.join("registry.json"), Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Registry { .. }));
}

#[test]
fn test_temp_path_keeps_full_file_name() {
    use super::registry::temp_path;
    use std::path::Path;

    assert_eq!(
        temp_path(Path::new("/var/cache/cache.json")),
        Path::new("/var/cache/cache.json.tmp")
    );
    assert_ne!(
        temp_path(Path::new("cache.json")),
        temp_path(Path::new("cache.yaml"))
    );
    assert_eq!(temp_path(Path::new("cache.tmp")), Path::new("cache.tmp.tmp"));
}

#[tokio::test]
async fn test_registries_with_shared_stem_do_not_collide() {
    let dir = tempdir().unwrap();
    let json = ExpirationRegistry::persistent(dir.path().join("cache.json"));
    let yaml = ExpirationRegistry::persistent(dir.path().join("cache.yaml"));
    json.upsert(identity("/a", 1), Utc::now()).await;
    yaml.upsert(identity("/b", 2), Utc::now()).await;
    yaml.upsert(identity("/b", 3), Utc::now()).await;

    let (saved_json, saved_yaml) = tokio::join!(json.save(), yaml.save());
    saved_json.unwrap();
    saved_yaml.unwrap();

    let timeout = Duration::from_secs(1);
    let reopened_json = ExpirationRegistry::open(dir.path().join("cache.json"), timeout)
        .await
        .unwrap();
    let reopened_yaml = ExpirationRegistry::open(dir.path().join("cache.yaml"), timeout)
        .await
        .unwrap();
    assert_eq!(reopened_json.len().await, 1);
    assert_eq!(reopened_yaml.len().await, 2);
}

#[tokio::test]
async fn test_registry_file_named_tmp_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("registry.tmp");
    let registry = ExpirationRegistry::persistent(&path);
    registry.upsert(identity("/a", 1), Utc::now()).await;

    registry.save().await.unwrap();

    let reopened = ExpirationRegistry::open(&path, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(reopened.snapshot().await, registry.snapshot().await);
}

#[tokio::test]
async fn test_save_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let registry = ExpirationRegistry::persistent(dir.path().join("missing/registry.json"));
    registry.upsert(identity("/a", 1), Utc::now()).await;

    assert!(registry.save().await.is_err());
}

#[tokio::test]
async fn test_concurrent_saves() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("registry.json");
    let registry = ExpirationRegistry::persistent(&path);
    let expires = Utc.with_ymd_and_hms(2014, 3, 5, 18, 0, 0).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry.upsert(identity("/char/MarketOrders.xml.aspx", i), expires).await;
                registry.save().await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let reopened = ExpirationRegistry::open(&path, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(reopened.len().await, 8);
}

// ============================================================================
// JSON Tests
// ============================================================================

#[tokio::test]
async fn test_json_round_trip() {
    let registry = ExpirationRegistry::in_memory();
    let expires = Utc.with_ymd_and_hms(2014, 3, 5, 18, 0, 0).unwrap();
    registry.upsert(identity("/char/MarketOrders.xml.aspx", 1), expires).await;

    let json = registry.to_json().await.unwrap();
    assert!(json.contains("\"entries\""));
    assert!(json.contains("2014-03-05T18:00:00Z"));

    let restored = ExpirationRegistry::from_json(&json).unwrap();
    assert!(restored.is_in_memory());
    assert_eq!(
        restored.lookup(&identity("/char/MarketOrders.xml.aspx", 1)).await,
        Some(expires)
    );
}

#[test]
fn test_from_json_empty_snapshot() {
    let registry = ExpirationRegistry::from_json("{}").unwrap();
    assert!(registry.is_in_memory());
}

#[test]
fn test_from_json_invalid() {
    assert!(matches!(
        ExpirationRegistry::from_json("[1, 2"),
        Err(Error::JsonParse(_))
    ));
}
