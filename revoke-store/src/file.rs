//! File-based revocation store with persistence.
//!
//! Keeps records in memory and rewrites the backing file on every
//! revocation. Suitable for single-node deployments where durability is
//! needed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use revoke_core::constants::{STORE_FILE_HEADER_SIZE, STORE_FILE_MAGIC, STORE_FILE_VERSION};
use revoke_core::error::{Result, RevocationError};
use revoke_core::traits::{Capability, RevocationStore};
use revoke_core::types::{Jti, RevokedRecord};

use crate::MemoryStore;

/// File-based revocation store.
///
/// Uses a memory store internally and persists the full record set after
/// each write.
///
/// # File Format
///
/// ```text
/// magic (4 bytes): "RVKD"
/// version (1 byte): 1
/// count (8 bytes, LE): number of records
/// records (variable): JSON array of revocation records
/// ```
pub struct FileStore {
    /// Path to the storage file
    path: PathBuf,
    /// In-memory storage
    memory: MemoryStore,
    /// Rejects writes and reports `record_revoked` as unsupported
    read_only: bool,
    /// Serializes saves so concurrent writers never share the temp file
    save_lock: Mutex<()>,
}

impl FileStore {
    /// Opens a writable store at the given path.
    ///
    /// If the file exists, it is loaded. Otherwise the store starts empty and
    /// the file is created on the first write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, false).await
    }

    /// Opens a store that can only list revocations.
    ///
    /// A cache refuses to bind to such a store since it cannot mirror
    /// revocations back to disk.
    pub async fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, true).await
    }

    async fn open_with_mode(path: impl AsRef<Path>, read_only: bool) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            memory: MemoryStore::new(),
            read_only,
            save_lock: Mutex::new(()),
        };

        if fs::try_exists(&store.path).await? {
            store.load().await?;
        }

        Ok(store)
    }

    /// Loads records from the file.
    #[instrument(skip(self), fields(path = ?self.path))]
    async fn load(&self) -> Result<()> {
        let mut file = fs::File::open(&self.path).await?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;

        if contents.len() < STORE_FILE_HEADER_SIZE {
            return Err(RevocationError::StoreError("File too short".into()));
        }

        if &contents[0..4] != STORE_FILE_MAGIC {
            return Err(RevocationError::StoreError("Invalid magic bytes".into()));
        }

        let version = contents[4];
        if version != STORE_FILE_VERSION {
            return Err(RevocationError::VersionMismatch {
                expected: STORE_FILE_VERSION,
                actual: version,
            });
        }

        let mut count_bytes = [0u8; 8];
        count_bytes.copy_from_slice(&contents[5..STORE_FILE_HEADER_SIZE]);
        let count = u64::from_le_bytes(count_bytes);

        let records: Vec<RevokedRecord> = if contents.len() > STORE_FILE_HEADER_SIZE {
            serde_json::from_slice(&contents[STORE_FILE_HEADER_SIZE..])?
        } else {
            Vec::new()
        };

        if records.len() as u64 != count {
            return Err(RevocationError::StoreError(format!(
                "Record count mismatch: header says {}, found {}",
                count,
                records.len()
            )));
        }

        let imported = self.memory.import(records);
        info!(count, imported, "Loaded revocations from file");

        Ok(())
    }

    /// Writes all records to the file.
    #[instrument(skip(self), fields(path = ?self.path))]
    pub async fn save(&self) -> Result<()> {
        if self.read_only {
            return Err(RevocationError::ReadOnlyStore);
        }

        let _guard = self.save_lock.lock().await;

        let records = self.memory.all_records();
        let count = records.len() as u64;
        let serialized = serde_json::to_vec(&records)?;

        let mut contents = Vec::with_capacity(STORE_FILE_HEADER_SIZE + serialized.len());
        contents.extend_from_slice(STORE_FILE_MAGIC);
        contents.push(STORE_FILE_VERSION);
        contents.extend_from_slice(&count.to_le_bytes());
        contents.extend_from_slice(&serialized);

        // Write to temp, then rename
        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&contents).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &self.path).await?;

        debug!(count, "Revocations saved");
        Ok(())
    }

    /// Sibling path the next save is staged at: the full file name plus `.tmp`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the store rejects writes.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns the underlying memory store for direct access.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

#[async_trait]
impl RevocationStore for FileStore {
    async fn list_revoked(&self) -> Result<Vec<RevokedRecord>> {
        self.memory.list_revoked().await
    }

    async fn record_revoked(&self, jti: &Jti) -> Result<()> {
        if self.read_only {
            return Err(RevocationError::ReadOnlyStore);
        }
        self.memory.record_revoked(jti).await?;
        self.save().await
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::ListRevoked => true,
            Capability::RecordRevoked => !self.read_only,
        }
    }
}
