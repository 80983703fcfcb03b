//! In-memory set of revoked token identifiers.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use revoke_core::error::{Result, RevocationError};
use revoke_core::traits::{Extension, ExtensionRegistry, RevocationStore};
use revoke_core::types::Jti;

use crate::config::{CacheConfig, CacheStats};
use crate::guard::InitGuard;
use crate::validator::CapabilityValidator;

/// Revoked identifiers together with the store they were hydrated from.
///
/// Swapped as one unit so a revocation never lands in one generation's set
/// while being recorded in another generation's store.
struct State {
    revoked: HashSet<Jti>,
    backing: Arc<dyn RevocationStore>,
}

/// Revocation cache backed by a persistent store.
///
/// The cache is either initialized eagerly with [`init`](Self::init) or
/// constructed empty with [`new`](Self::new) and bound later with
/// [`initialize`](Self::initialize). Until then every query fails with
/// [`RevocationError::NotInitialized`].
///
/// # Consistency
///
/// [`revoke`](Self::revoke) updates memory before the backing store. If the
/// store write fails the error is returned, but the identifier stays revoked
/// in memory; the store catches up only when the caller retries.
///
/// Revocations and initialization exclude each other: a revocation issued
/// while the cache is re-initializing waits for the new state and is applied
/// to it.
///
/// # Equality
///
/// Caches compare by identity: a cache equals itself and any `Arc` clone of
/// itself, never a separately constructed cache, whatever the contents.
///
/// # Thread Safety
///
/// All operations are thread-safe. The state lock is never held across the
/// backing store's `.await` points.
pub struct RevocationCache {
    config: CacheConfig,
    guard: InitGuard,
    /// `None` until initialized
    state: RwLock<Option<State>>,
    /// Held exclusively by `initialize`, shared by in-flight revocations
    init_lock: tokio::sync::RwLock<()>,
}

impl RevocationCache {
    /// Creates an uninitialized cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates an uninitialized cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            config,
            guard: InitGuard::new(),
            state: RwLock::new(None),
            init_lock: tokio::sync::RwLock::new(()),
        }
    }

    /// Creates a cache and initializes it immediately.
    ///
    /// Fails if initialization fails; see [`initialize`](Self::initialize).
    pub async fn init(
        host: &dyn ExtensionRegistry,
        backing: Arc<dyn RevocationStore>,
    ) -> Result<Arc<Self>> {
        Self::init_with_config(host, backing, CacheConfig::default()).await
    }

    /// Creates a cache with custom configuration and initializes it immediately.
    pub async fn init_with_config(
        host: &dyn ExtensionRegistry,
        backing: Arc<dyn RevocationStore>,
        config: CacheConfig,
    ) -> Result<Arc<Self>> {
        let cache = Arc::new(Self::with_config(config));
        cache.initialize(host, backing).await?;
        Ok(cache)
    }

    /// Binds the cache to a backing store and registers it with the host.
    ///
    /// # Flow
    /// 1. Check the store supports listing and recording revocations
    /// 2. List the store's revocations (errors are returned unchanged)
    /// 3. Hydrate the in-memory set from the listed records
    /// 4. Keep the store handle and mark the cache initialized
    /// 5. Register the cache in the host under the configured key
    ///
    /// On failure the cache is left exactly as it was. Calling this again
    /// re-validates, re-hydrates and replaces the host registration.
    #[instrument(skip_all, fields(key = %self.config.extension_key))]
    pub async fn initialize(
        self: &Arc<Self>,
        host: &dyn ExtensionRegistry,
        backing: Arc<dyn RevocationStore>,
    ) -> Result<()> {
        let _init = self.init_lock.write().await;

        let records = CapabilityValidator::validate(backing.as_ref()).await?;

        let mut revoked = HashSet::new();
        revoked
            .try_reserve(self.config.initial_capacity.max(records.len()))
            .map_err(|e| {
                RevocationError::ConfigError(format!(
                    "cannot reserve {} revocation slots: {}",
                    self.config.initial_capacity, e
                ))
            })?;
        revoked.extend(records.into_iter().map(|record| record.jti));
        let count = revoked.len();

        *self.state.write() = Some(State { revoked, backing });
        self.guard.mark_initialized();

        let extension: Extension = self.clone();
        host.set(&self.config.extension_key, extension);

        info!(count, "Revocation cache initialized");
        Ok(())
    }

    /// Returns true if the identifier has been revoked.
    pub fn is_revoked(&self, jti: &Jti) -> Result<bool> {
        self.guard.check()?;
        let state = self.state.read();
        let state = state.as_ref().ok_or(RevocationError::NotInitialized)?;
        Ok(state.revoked.contains(jti))
    }

    /// Revokes an identifier and records it in the backing store.
    ///
    /// Revoking an identifier twice is a no-op for the in-memory set; the
    /// backing store is still asked to record it.
    #[instrument(skip(self, jti), fields(jti = %jti))]
    pub async fn revoke(&self, jti: Jti) -> Result<()> {
        self.guard.check()?;

        let _generation = self.init_lock.read().await;

        let (backing, newly_revoked) = {
            let mut state = self.state.write();
            let state = state.as_mut().ok_or(RevocationError::NotInitialized)?;
            (state.backing.clone(), state.revoked.insert(jti.clone()))
        };
        debug!(newly_revoked, "Revoked in memory");

        if let Err(err) = backing.record_revoked(&jti).await {
            warn!(error = %err, "Backing store rejected revocation; memory is ahead of store");
            return Err(err);
        }

        Ok(())
    }

    /// Returns true once initialization has completed.
    pub fn is_initialized(&self) -> bool {
        self.guard.is_initialized()
    }

    /// Returns a copy of the revoked set, or `None` if uninitialized.
    pub fn snapshot(&self) -> Option<HashSet<Jti>> {
        self.state.read().as_ref().map(|state| state.revoked.clone())
    }

    /// Returns the number of revoked identifiers (zero if uninitialized).
    pub fn len(&self) -> usize {
        self.state.read().as_ref().map_or(0, |state| state.revoked.len())
    }

    /// Returns true if no identifiers are revoked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.read();
        CacheStats {
            initialized: state.is_some(),
            entries: state.as_ref().map_or(0, |s| s.revoked.len()),
            capacity: state.as_ref().map_or(0, |s| s.revoked.capacity()),
        }
    }
}

impl Default for RevocationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for RevocationCache {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for RevocationCache {}

impl fmt::Display for RevocationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.read().as_ref() {
            Some(state) => write!(f, "revocation cache with {} item(s)", state.revoked.len()),
            None => f.write_str("revocation cache (uninitialized)"),
        }
    }
}

impl fmt::Debug for RevocationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevocationCache")
            .field("extension_key", &self.config.extension_key)
            .field("initialized", &self.is_initialized())
            .field("entries", &self.len())
            .finish()
    }
}
