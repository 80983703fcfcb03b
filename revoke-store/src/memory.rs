//! In-memory revocation store.
//!
//! Fast, thread-safe storage suitable for development, testing,
//! and single-process deployments.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, instrument};

use revoke_core::error::Result;
use revoke_core::traits::RevocationStore;
use revoke_core::types::{Jti, RevokedRecord};

/// In-memory revocation store.
///
/// Uses a concurrent map for thread-safe access without requiring
/// external synchronization. Recording an identifier that is already
/// present keeps the original record and its timestamp.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Primary storage: jti → record
    records: DashMap<Jti, RevokedRecord>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Creates a store with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity),
        }
    }

    /// Creates a store pre-populated with the given identifiers.
    pub fn with_revoked<I, J>(jtis: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: Into<Jti>,
    {
        let store = Self::new();
        for jti in jtis {
            let jti = jti.into();
            store.records.insert(jti.clone(), RevokedRecord::new(jti));
        }
        store
    }

    /// Returns true if the identifier has been recorded.
    pub fn contains(&self, jti: &Jti) -> bool {
        self.records.contains_key(jti)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes all records.
    pub fn clear(&self) {
        self.records.clear();
    }

    /// Returns all records ordered by revocation time (for export/backup).
    pub fn all_records(&self) -> Vec<RevokedRecord> {
        let mut records: Vec<RevokedRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.revoked_at.cmp(&b.revoked_at).then_with(|| a.jti.cmp(&b.jti)));
        records
    }

    /// Imports records, keeping existing entries on conflict.
    ///
    /// Returns the number of records that were new.
    pub fn import(&self, records: Vec<RevokedRecord>) -> usize {
        let mut imported = 0;
        for record in records {
            if let Entry::Vacant(slot) = self.records.entry(record.jti.clone()) {
                slot.insert(record);
                imported += 1;
            }
        }
        imported
    }
}

#[async_trait]
impl RevocationStore for MemoryStore {
    #[instrument(skip(self))]
    async fn list_revoked(&self) -> Result<Vec<RevokedRecord>> {
        let records = self.all_records();
        debug!(count = records.len(), "Listed revoked identifiers");
        Ok(records)
    }

    #[instrument(skip(self, jti), fields(jti = %jti))]
    async fn record_revoked(&self, jti: &Jti) -> Result<()> {
        self.records
            .entry(jti.clone())
            .or_insert_with(|| RevokedRecord::new(jti.clone()));
        debug!("Recorded revocation");
        Ok(())
    }
}
