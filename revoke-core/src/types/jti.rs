//! Revoked token identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token identifier (the `jti` claim) used as the unit of revocation.
///
/// Hosts issue identifiers either as strings or as integers, so both forms
/// are accepted. The two forms never compare equal: `Jti::from(7u64)` and
/// `Jti::from("7")` are distinct identifiers.
///
/// Serialized untagged, so a JSON record may carry `"jti": 123` or
/// `"jti": "abc"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Jti {
    /// Integer identifier, typically a database row id.
    Numeric(u64),
    /// Opaque string identifier, typically a UUID.
    Text(String),
}

impl Jti {
    /// Returns the text form if this is a string identifier.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Jti::Text(s) => Some(s),
            Jti::Numeric(_) => None,
        }
    }

    /// Returns the integer form if this is a numeric identifier.
    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            Jti::Numeric(n) => Some(*n),
            Jti::Text(_) => None,
        }
    }
}

impl fmt::Display for Jti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jti::Numeric(n) => write!(f, "{}", n),
            Jti::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Jti {
    fn from(n: u64) -> Self {
        Jti::Numeric(n)
    }
}

impl From<&str> for Jti {
    fn from(s: &str) -> Self {
        Jti::Text(s.to_owned())
    }
}

impl From<String> for Jti {
    fn from(s: String) -> Self {
        Jti::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(Jti::from(123u64), "123" ; "numeric")]
    #[test_case(Jti::from("a1b2-c3"), "a1b2-c3" ; "text")]
    #[test_case(Jti::from(String::new()), "" ; "empty text")]
    fn test_display(jti: Jti, expected: &str) {
        assert_eq!(jti.to_string(), expected);
    }

    #[test_case(r#"123"#, Jti::Numeric(123) ; "integer")]
    #[test_case(r#""123""#, Jti::Text("123".into()) ; "quoted integer")]
    #[test_case(r#""7f3e""#, Jti::Text("7f3e".into()) ; "uuid fragment")]
    fn test_deserialize_untagged(json: &str, expected: Jti) {
        let jti: Jti = serde_json::from_str(json).unwrap();
        assert_eq!(jti, expected);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Jti::from(9u64).as_numeric(), Some(9));
        assert_eq!(Jti::from(9u64).as_text(), None);
        assert_eq!(Jti::from("nine").as_text(), Some("nine"));
        assert_eq!(Jti::from("nine").as_numeric(), None);
    }

    proptest! {
        #[test]
        fn numeric_and_text_forms_never_collide(n in any::<u64>()) {
            prop_assert_ne!(Jti::from(n), Jti::from(n.to_string()));
        }
    }
}
