//! Shared constants for the revocation cache.

// ═══════════════════════════════════════════════════════════════════════════════
// HOST REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Key under which the cache registers itself in the host's extension registry.
pub const DEFAULT_EXTENSION_KEY: &str = "blacklist";

/// Default number of identifiers the in-memory set is pre-sized for.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Largest initial capacity accepted from configuration.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

// ═══════════════════════════════════════════════════════════════════════════════
// FILE STORE FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Magic bytes at the start of a revocation store file.
pub const STORE_FILE_MAGIC: &[u8; 4] = b"RVKD";

/// Current revocation store file format version.
pub const STORE_FILE_VERSION: u8 = 1;

/// Length of the fixed header: magic (4) + version (1) + count (8).
pub const STORE_FILE_HEADER_SIZE: usize = 13;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size_matches_layout() {
        assert_eq!(STORE_FILE_HEADER_SIZE, STORE_FILE_MAGIC.len() + 1 + 8);
    }

    #[test]
    fn test_default_capacity_within_bound() {
        assert!(DEFAULT_INITIAL_CAPACITY <= MAX_INITIAL_CAPACITY);
    }
}
