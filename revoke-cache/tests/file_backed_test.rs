use std::sync::Arc;

use revoke_cache::{is_revoked, lookup, HostContext, Jti, RevocationCache};
use revoke_core::traits::Capability;
use revoke_core::RevocationError;
use revoke_store::FileStore;
use tempfile::tempdir;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "revoke=debug".into()))
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn revocations_survive_restart() {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("revoked.bin");

    {
        let host = HostContext::new();
        let store = Arc::new(FileStore::open(&path).await.unwrap());
        let cache = RevocationCache::init(&host, store).await.unwrap();

        cache.revoke(Jti::from(123u64)).await.unwrap();
        cache.revoke(Jti::from("7f3e-91aa")).await.unwrap();
    }

    let host = HostContext::new();
    let store = Arc::new(FileStore::open(&path).await.unwrap());
    let cache = RevocationCache::init(&host, store).await.unwrap();

    assert_eq!(cache.len(), 2);
    assert!(is_revoked(&host, &Jti::from(123u64)).unwrap());
    assert!(is_revoked(&host, &Jti::from("7f3e-91aa")).unwrap());
    assert!(!is_revoked(&host, &Jti::from(124u64)).unwrap());
}

#[tokio::test]
async fn read_only_store_is_rejected() {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("revoked.bin");

    let host = HostContext::new();
    let store = Arc::new(FileStore::open_read_only(&path).await.unwrap());
    let cache = Arc::new(RevocationCache::new());

    let err = cache.initialize(&host, store).await.unwrap_err();

    assert!(err.is_configuration_error());
    assert!(matches!(err, RevocationError::MissingCapability(Capability::RecordRevoked)));
    assert!(!cache.is_initialized());
    assert!(lookup(&host).is_err());
}

#[tokio::test]
async fn deferred_cache_shared_through_host() {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("revoked.bin");

    // Constructed before the store exists, as a host would at startup
    let cache = Arc::new(RevocationCache::new());
    let host = Arc::new(HostContext::new());
    assert!(cache.is_revoked(&Jti::from("early")).is_err());

    let store = Arc::new(FileStore::open(&path).await.unwrap());
    cache.initialize(host.as_ref(), store.clone()).await.unwrap();

    let worker = {
        let host = host.clone();
        tokio::spawn(async move {
            let cache = lookup(host.as_ref()).unwrap();
            cache.revoke(Jti::from("from-worker")).await.unwrap();
        })
    };
    worker.await.unwrap();

    assert!(cache.is_revoked(&Jti::from("from-worker")).unwrap());
    assert!(store.memory().contains(&Jti::from("from-worker")));
    assert_eq!(cache.to_string(), "revocation cache with 1 item(s)");
}
