//! Persisted revocation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Jti;

/// A revocation as persisted by a backing store.
///
/// The cache only reads `jti`; the timestamp is kept for stores and
/// operators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedRecord {
    /// Revoked token identifier
    pub jti: Jti,
    /// When the revocation was recorded
    pub revoked_at: DateTime<Utc>,
}

impl RevokedRecord {
    /// Creates a record stamped with the current time.
    pub fn new(jti: Jti) -> Self {
        Self {
            jti,
            revoked_at: Utc::now(),
        }
    }

    /// Creates a record with an explicit timestamp.
    pub fn at(jti: Jti, revoked_at: DateTime<Utc>) -> Self {
        Self { jti, revoked_at }
    }
}

impl From<Jti> for RevokedRecord {
    fn from(jti: Jti) -> Self {
        Self::new(jti)
    }
}
