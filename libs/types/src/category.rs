//! Category keys
//!
//! A category names one external number source (primes, fibonacci, even,
//! random, ...). Which keys exist is configuration; this type only enforces
//! that a key is usable as a single URL path segment.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CategoryError;

/// Key identifying an external number category, e.g. `"p"` for primes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Create a key, rejecting empty input and anything that is not a single
    /// path segment.
    pub fn try_new(key: impl Into<String>) -> Result<Self, CategoryError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CategoryError::Empty);
        }
        if key.chars().any(|c| c == '/' || c.is_whitespace() || c.is_control()) {
            return Err(CategoryError::Malformed { key });
        }
        Ok(Self(key))
    }

    /// Get the key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CategoryKey {
    type Error = CategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CategoryKey> for String {
    fn from(key: CategoryKey) -> Self {
        key.0
    }
}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_key_creation() {
        let key = CategoryKey::try_new("p").unwrap();
        assert_eq!(key.as_str(), "p");
        assert_eq!(key.to_string(), "p");
    }

    #[test]
    fn test_category_key_rejects_empty() {
        assert_eq!(CategoryKey::try_new(""), Err(CategoryError::Empty));
    }

    #[test]
    fn test_category_key_rejects_path_and_whitespace() {
        assert!(CategoryKey::try_new("p/q").is_err());
        assert!(CategoryKey::try_new("p q").is_err());
        assert!(CategoryKey::try_new("p\n").is_err());
    }

    #[test]
    fn test_category_key_serialization() {
        let key = CategoryKey::try_new("fibo").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"fibo\"");

        let deserialized: CategoryKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, deserialized);

        assert!(serde_json::from_str::<CategoryKey>("\"\"").is_err());
    }

    proptest::proptest! {
        #[test]
        fn accepts_any_single_segment(key in "[a-zA-Z0-9_.-]{1,16}") {
            let parsed = CategoryKey::try_new(key.clone()).unwrap();
            proptest::prop_assert_eq!(parsed.as_str(), key.as_str());
        }
    }
}
