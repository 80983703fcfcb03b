//! # Revoke Core
//!
//! Core types, errors, and traits shared by the revocation cache crates.
//!
//! - **Types**: revoked identifiers ([`Jti`]) and store records ([`RevokedRecord`])
//! - **Errors**: configuration and store-access error taxonomy
//! - **Constants**: registry keys and file format markers
//! - **Traits**: the backing-store and host-registry interfaces
//!
//! ## Example
//!
//! ```rust
//! use revoke_core::{Jti, RevokedRecord};
//!
//! let record = RevokedRecord::new(Jti::from(123u64));
//! let json = serde_json::to_string(&record).unwrap();
//! assert!(json.contains("123"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, RevocationError};
pub use traits::*;
pub use types::*;
