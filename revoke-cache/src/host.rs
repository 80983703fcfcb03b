//! Host registry binding.
//!
//! The cache registers itself in the host's extension registry when it is
//! initialized, so request-handling code that only holds the host can still
//! answer revocation queries.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use revoke_core::constants::DEFAULT_EXTENSION_KEY;
use revoke_core::error::{Result, RevocationError};
use revoke_core::traits::{Extension, ExtensionRegistry};
use revoke_core::types::Jti;

use crate::cache::RevocationCache;

/// Process-wide extension registry owned by the host application.
///
/// Create one at startup and share it (usually behind an `Arc`) with every
/// component that needs to look up extensions. Hosts that already have a
/// registry can implement [`ExtensionRegistry`] on it instead.
#[derive(Default)]
pub struct HostContext {
    extensions: DashMap<String, Extension>,
}

impl HostContext {
    /// Creates an empty host context.
    pub fn new() -> Self {
        Self {
            extensions: DashMap::new(),
        }
    }

    /// Returns true if an extension is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.extensions.contains_key(key)
    }

    /// Returns the number of registered extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl ExtensionRegistry for HostContext {
    fn get(&self, key: &str) -> Option<Extension> {
        self.extensions.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: Extension) {
        self.extensions.insert(key.to_owned(), value);
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.extensions.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        f.debug_struct("HostContext").field("extensions", &keys).finish()
    }
}

/// Returns the cache registered in `host` under the default key.
pub fn lookup(host: &dyn ExtensionRegistry) -> Result<Arc<RevocationCache>> {
    lookup_with_key(host, DEFAULT_EXTENSION_KEY)
}

/// Returns the cache registered in `host` under `key`.
///
/// Fails with [`RevocationError::NotRegistered`] if nothing is registered
/// there or the entry is not a revocation cache.
pub fn lookup_with_key(host: &dyn ExtensionRegistry, key: &str) -> Result<Arc<RevocationCache>> {
    host.get(key)
        .ok_or_else(|| RevocationError::NotRegistered(key.to_owned()))?
        .downcast::<RevocationCache>()
        .map_err(|_| RevocationError::NotRegistered(key.to_owned()))
}

/// Returns true if `jti` is revoked, using the cache registered in `host`.
pub fn is_revoked(host: &dyn ExtensionRegistry, jti: &Jti) -> Result<bool> {
    lookup(host)?.is_revoked(jti)
}
