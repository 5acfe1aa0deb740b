//! Generic translation storage and fallback resolution.
//!
//! Every translated catalog entity keeps its localized fields in a
//! [`TranslationSet`]: a map from language code to one content struct per
//! language. Public reads resolve the set into a single merged view for the
//! requested language, falling back to the default language.
//!
//! Fallback is field-by-field, not row-by-row: a translation row may exist
//! for the requested language with some fields left empty, and those
//! specific fields still fall back to the default language's values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Localized fields of one entity in one language.
///
/// Implementors are plain structs of `String` fields. `Default` must yield
/// the all-empty content used when no translation exists in any language.
pub trait LocalizedFields: Clone + Default {
    /// Fill every empty field from `fallback`, leaving non-empty fields
    /// untouched.
    fn merge_missing_from(&mut self, fallback: &Self);

    /// Whether all required fields are non-empty (after trimming).
    ///
    /// Incomplete translations for non-default languages are skipped on
    /// write rather than stored or rejected.
    fn is_complete(&self) -> bool;
}

/// Returns `b` when `a` is empty after trimming, `a` otherwise.
///
/// Helper for `merge_missing_from` implementations.
pub fn fallback_field(a: &mut String, b: &str) {
    if a.trim().is_empty() {
        *a = b.to_string();
    }
}

/// Map of language code to localized content for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationSet<T>(HashMap<String, T>);

impl<T> Default for TranslationSet<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<T: LocalizedFields> TranslationSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: impl Into<String>, content: T) {
        self.0.insert(language.into(), content);
    }

    pub fn get(&self, language: &str) -> Option<&T> {
        self.0.get(language)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve the merged view for `requested`, falling back to `default`.
    ///
    /// Starts from the requested language's content (or the default
    /// language's when the requested one is absent), then fills any field
    /// still empty from the default language. Fields with no value in
    /// either language resolve to the empty string.
    pub fn resolve(&self, requested: &str, default: &str) -> T {
        let mut merged = self
            .0
            .get(requested)
            .or_else(|| self.0.get(default))
            .cloned()
            .unwrap_or_default();

        if requested != default {
            if let Some(fallback) = self.0.get(default) {
                merged.merge_missing_from(fallback);
            }
        }

        merged
    }
}

impl<T> From<HashMap<String, T>> for TranslationSet<T> {
    fn from(map: HashMap<String, T>) -> Self {
        Self(map)
    }
}
