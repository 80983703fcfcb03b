//! Backing store validation.

use tracing::{debug, instrument};

use revoke_core::error::{Result, RevocationError};
use revoke_core::traits::{Capability, RevocationStore};
use revoke_core::types::RevokedRecord;

/// Checks that a backing store can serve a cache before the cache binds to it.
pub struct CapabilityValidator;

impl CapabilityValidator {
    /// Fails with [`RevocationError::MissingCapability`] for the first
    /// required operation the store does not support.
    pub fn check_capabilities(store: &dyn RevocationStore) -> Result<()> {
        for capability in Capability::REQUIRED {
            if !store.supports(capability) {
                return Err(RevocationError::MissingCapability(capability));
            }
        }
        Ok(())
    }

    /// Checks capabilities, then lists the store's revocations.
    ///
    /// Errors from `list_revoked` are returned unchanged. On success the
    /// listed records are handed back so the caller does not list twice.
    #[instrument(skip(store))]
    pub async fn validate(store: &dyn RevocationStore) -> Result<Vec<RevokedRecord>> {
        Self::check_capabilities(store)?;
        let records = store.list_revoked().await?;
        debug!(count = records.len(), "Backing store validated");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use revoke_core::types::Jti;

    struct PartialStore {
        supported: Vec<Capability>,
    }

    #[async_trait]
    impl RevocationStore for PartialStore {
        async fn list_revoked(&self) -> Result<Vec<RevokedRecord>> {
            Ok(vec![RevokedRecord::new(Jti::from(1u64))])
        }

        async fn record_revoked(&self, _jti: &Jti) -> Result<()> {
            Ok(())
        }

        fn supports(&self, capability: Capability) -> bool {
            self.supported.contains(&capability)
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl RevocationStore for BrokenStore {
        async fn list_revoked(&self) -> Result<Vec<RevokedRecord>> {
            Err(RevocationError::StoreError("connection refused".into()))
        }

        async fn record_revoked(&self, _jti: &Jti) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_missing_list_capability() {
        let store = PartialStore { supported: vec![Capability::RecordRevoked] };
        let result = CapabilityValidator::validate(&store).await;
        assert!(matches!(
            result,
            Err(RevocationError::MissingCapability(Capability::ListRevoked))
        ));
    }

    #[tokio::test]
    async fn test_missing_record_capability() {
        let store = PartialStore { supported: vec![Capability::ListRevoked] };
        let result = CapabilityValidator::validate(&store).await;
        assert!(matches!(
            result,
            Err(RevocationError::MissingCapability(Capability::RecordRevoked))
        ));
    }

    #[tokio::test]
    async fn test_list_failure_propagates() {
        let result = CapabilityValidator::validate(&BrokenStore).await;
        match result {
            Err(RevocationError::StoreError(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_valid_store_returns_records() {
        let store = PartialStore { supported: Capability::REQUIRED.to_vec() };
        let records = CapabilityValidator::validate(&store).await.unwrap();
        assert_eq!(records.len(), 1);
    }
}
