//! Revocation cache for token identifiers.
//!
//! Holds the set of revoked `jti` values in memory, hydrated from a
//! [`RevocationStore`] and mirrored back to it on every revocation.
//!
//! ## Example
//!
//! ```rust,ignore
//! use revoke_cache::{HostContext, RevocationCache};
//! use revoke_store::MemoryStore;
//!
//! let host = HostContext::new();
//! let cache = RevocationCache::init(&host, Arc::new(MemoryStore::new())).await?;
//!
//! cache.revoke(Jti::from("a1b2")).await?;
//! assert!(revoke_cache::is_revoked(&host, &Jti::from("a1b2"))?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod config;
mod guard;
mod host;
mod validator;

pub use cache::RevocationCache;
pub use config::{CacheConfig, CacheStats};
pub use guard::InitGuard;
pub use host::{is_revoked, lookup, lookup_with_key, HostContext};
pub use validator::CapabilityValidator;

pub use revoke_core::traits::{ExtensionRegistry, RevocationStore};
pub use revoke_core::types::Jti;
