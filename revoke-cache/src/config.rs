//! Cache configuration and statistics.

use serde::{Deserialize, Serialize};

use revoke_core::constants::{DEFAULT_EXTENSION_KEY, DEFAULT_INITIAL_CAPACITY, MAX_INITIAL_CAPACITY};
use revoke_core::error::{Result, RevocationError};

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Key the cache registers under in the host's extension registry
    pub extension_key: String,
    /// Number of identifiers the in-memory set is pre-sized for
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            extension_key: DEFAULT_EXTENSION_KEY.into(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Loads configuration from the environment (and `.env`, if present).
    ///
    /// Reads `REVOCATION_EXTENSION_KEY` and `REVOCATION_INITIAL_CAPACITY`;
    /// unset variables fall back to the defaults. Capacities above
    /// [`MAX_INITIAL_CAPACITY`] are rejected.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let extension_key = match lookup("REVOCATION_EXTENSION_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err(RevocationError::ConfigError(
                    "REVOCATION_EXTENSION_KEY cannot be empty".into(),
                ))
            }
            Some(key) => key.trim().to_owned(),
            None => defaults.extension_key,
        };

        let initial_capacity = match lookup("REVOCATION_INITIAL_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity <= MAX_INITIAL_CAPACITY)
                .ok_or_else(|| {
                    RevocationError::ConfigError(format!(
                        "REVOCATION_INITIAL_CAPACITY must be an integer between 0 and {}, got '{}'",
                        MAX_INITIAL_CAPACITY, raw
                    ))
                })?,
            None => defaults.initial_capacity,
        };

        Ok(Self {
            extension_key,
            initial_capacity,
        })
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub initialized: bool,
    pub entries: usize,
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.extension_key, "blacklist");
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = CacheConfig::from_lookup(lookup_from(&[
            ("REVOCATION_EXTENSION_KEY", "revoked_tokens"),
            ("REVOCATION_INITIAL_CAPACITY", " 64 "),
        ]))
        .unwrap();
        assert_eq!(config.extension_key, "revoked_tokens");
        assert_eq!(config.initial_capacity, 64);
    }

    #[test]
    fn test_lookup_falls_back_to_defaults() {
        let config = CacheConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        let result = CacheConfig::from_lookup(lookup_from(&[("REVOCATION_INITIAL_CAPACITY", "lots")]));
        assert!(matches!(result, Err(RevocationError::ConfigError(_))));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        for raw in ["18446744073709551615", "16777217"] {
            let result = CacheConfig::from_lookup(lookup_from(&[("REVOCATION_INITIAL_CAPACITY", raw)]));
            assert!(matches!(result, Err(RevocationError::ConfigError(_))), "accepted {}", raw);
        }

        let config = CacheConfig::from_lookup(lookup_from(&[("REVOCATION_INITIAL_CAPACITY", "16777216")])).unwrap();
        assert_eq!(config.initial_capacity, MAX_INITIAL_CAPACITY);
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = CacheConfig::from_lookup(lookup_from(&[("REVOCATION_EXTENSION_KEY", "  ")]));
        assert!(matches!(result, Err(RevocationError::ConfigError(_))));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: CacheConfig = serde_json::from_str(r#"{"initial_capacity": 8}"#).unwrap();
        assert_eq!(config.extension_key, "blacklist");
        assert_eq!(config.initial_capacity, 8);
    }
}
