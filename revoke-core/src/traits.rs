//! Common traits for the revocation cache.
//!
//! These traits define the seams between the cache and the collaborators it
//! does not own: the persistent token store and the host's extension registry.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Jti, RevokedRecord};

// ═══════════════════════════════════════════════════════════════════════════════
// BACKING STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Operations a backing store must provide before a cache can bind to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Listing every persisted revocation.
    ListRevoked,
    /// Persisting a single revocation.
    RecordRevoked,
}

impl Capability {
    /// Every capability a cache requires.
    pub const REQUIRED: [Capability; 2] = [Capability::ListRevoked, Capability::RecordRevoked];

    /// Returns the operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ListRevoked => "list_revoked",
            Capability::RecordRevoked => "record_revoked",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interface to the persistent store of revoked identifiers.
///
/// Implementations might use:
/// - In-memory storage (for testing/development)
/// - A local file (single-node deployments)
/// - A database table behind an ORM
///
/// Errors returned here are surfaced to cache callers unchanged.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Returns every persisted revocation.
    async fn list_revoked(&self) -> Result<Vec<RevokedRecord>>;

    /// Persists a single revoked identifier.
    async fn record_revoked(&self, jti: &Jti) -> Result<()>;

    /// Reports whether the store can perform the given operation.
    ///
    /// Stores that are only partially wired (a read-only replica, for
    /// instance) override this so the cache refuses to bind to them.
    fn supports(&self, capability: Capability) -> bool {
        let _ = capability;
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOST REGISTRY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A type-erased value held in a host's extension registry.
pub type Extension = Arc<dyn Any + Send + Sync>;

/// String-keyed registry of extensions owned by the host application.
pub trait ExtensionRegistry: Send + Sync {
    /// Returns the extension registered under `key`.
    fn get(&self, key: &str) -> Option<Extension>;

    /// Registers `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: Extension);
}
