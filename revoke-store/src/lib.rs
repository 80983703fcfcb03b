//! # Revoke Store
//!
//! Backing stores for the revocation cache.
//!
//! This crate provides two implementations of [`RevocationStore`]:
//!
//! - **Memory**: Fast in-memory storage for development and testing
//! - **File**: Persistent file-based storage for single-node deployments
//!
//! ## Example
//!
//! ```rust,ignore
//! use revoke_store::{FileStore, RevocationStore};
//!
//! let store = FileStore::open("revoked.bin").await?;
//! store.record_revoked(&Jti::from("a1b2")).await?;
//! let records = store.list_revoked().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod file;

pub use memory::MemoryStore;
pub use file::FileStore;

// Re-export the trait from core
pub use revoke_core::traits::RevocationStore;
