//! Error types for the revocation cache.
//!
//! Errors fall into two families: configuration errors, which are programming
//! or wiring defects and must not be retried, and store-access errors, which
//! come from the backing store and are surfaced to the caller unchanged.

use thiserror::Error;

use crate::traits::Capability;

/// Result type alias using `RevocationError`.
pub type Result<T> = std::result::Result<T, RevocationError>;

/// Main error type for all revocation operations.
#[derive(Debug, Error)]
pub enum RevocationError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The backing store does not provide a required operation.
    #[error("Backing store missing required capability: {0}")]
    MissingCapability(Capability),

    /// A cache operation was invoked before initialization completed.
    #[error("Revocation cache has not been initialized")]
    NotInitialized,

    /// No cache is registered in the host under the given key.
    #[error("No revocation cache registered under '{0}'")]
    NotRegistered(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORE ACCESS ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The backing store failed to read or write.
    #[error("Store error: {0}")]
    StoreError(String),

    /// The backing store was opened without write access.
    #[error("Store is read-only")]
    ReadOnlyStore,

    /// Persisted data was written by an incompatible format version.
    #[error("Store format version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version this build reads
        expected: u8,
        /// Version found in the file header
        actual: u8,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RevocationError {
    /// Returns true for wiring defects that must not be retried.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RevocationError::MissingCapability(_)
                | RevocationError::NotInitialized
                | RevocationError::NotRegistered(_)
                | RevocationError::ConfigError(_)
        )
    }

    /// Returns true if the error originated in the backing store.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            RevocationError::StoreError(_)
                | RevocationError::ReadOnlyStore
                | RevocationError::VersionMismatch { .. }
                | RevocationError::IoError(_)
                | RevocationError::JsonError(_)
        )
    }
}
