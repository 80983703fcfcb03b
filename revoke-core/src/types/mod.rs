//! Domain types for the revocation cache.
//!
//! - [`Jti`]: a revoked token identifier
//! - [`RevokedRecord`]: a persisted revocation as returned by a backing store

mod jti;
mod record;

pub use jti::*;
pub use record::*;
