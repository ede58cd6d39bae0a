//! Canonical category keys.
//!
//! Free-text categories arrive in whatever spelling the user typed ("Food",
//! "food ", "FOOD"). Every component that groups, joins or filters by
//! category must go through [`CategoryKey`] so all of them agree on what "the
//! same category" means.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Normalized, comparable form of a free-text category.
///
/// The key is the NFKC form of the input, trimmed and lower-cased. Two
/// categories belong to the same bucket if and only if their keys are
/// byte-equal; raw spellings are never compared anywhere in the engine.
///
/// # Examples
///
/// ```rust
/// use engine::CategoryKey;
///
/// let a = CategoryKey::new("Food").unwrap();
/// let b = CategoryKey::new("  fOOd ").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "food");
/// assert_eq!(a.display_label(), "Food");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Normalizes a raw category string into a key.
    ///
    /// Returns [`EngineError::InvalidCategory`] when the input is empty or
    /// whitespace-only. Normalization is idempotent: feeding a key back in
    /// yields the same key.
    pub fn new(raw: &str) -> ResultEngine<Self> {
        let normalized: String = raw.nfkc().collect();
        let normalized = normalized.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EngineError::InvalidCategory(
                "category must not be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the presentation form: first character upper-cased, the rest
    /// untouched ("coffee shop" becomes "Coffee shop", not "Coffee Shop").
    ///
    /// Labels are informational only and are never used as join keys.
    #[must_use]
    pub fn display_label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
