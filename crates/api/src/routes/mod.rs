//! HTTP route handlers.

pub mod blogs;
pub mod faqs;
pub mod features;
pub mod health;
pub mod languages;
pub mod orders;
pub mod products;
pub mod ratings;

use std::collections::HashMap;

use sqlx::PgPool;

use crate::error::ApiError;
use domain::models::{is_valid_language_code, LocalizedFields, TranslationSet, FALLBACK_LANGUAGE};
use persistence::repositories::LanguageRepository;

/// The store's default language code, for admin write paths.
pub(crate) async fn default_language(pool: &PgPool) -> Result<String, ApiError> {
    let repository = LanguageRepository::new(pool.clone());
    Ok(repository
        .default_code()
        .await?
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string()))
}

/// Filter submitted translations down to the storable set.
///
/// Language codes must be well-formed. An incomplete translation for the
/// default language is a validation error; incomplete translations for
/// other languages are dropped silently. When `require_default` is set
/// (create paths) the result must contain the default language.
pub(crate) fn sanitize_translations<T: LocalizedFields>(
    submitted: HashMap<String, T>,
    default_language: &str,
    require_default: bool,
) -> Result<TranslationSet<T>, ApiError> {
    let mut set = TranslationSet::new();

    for (code, content) in submitted {
        if !is_valid_language_code(&code) {
            return Err(ApiError::Validation(format!(
                "Invalid language code '{}'",
                code
            )));
        }

        if code == default_language {
            if !content.is_complete() {
                return Err(ApiError::Validation(format!(
                    "Translation for default language '{}' must be complete",
                    default_language
                )));
            }
            set.insert(code, content);
        } else if content.is_complete() {
            set.insert(code, content);
        }
        // Incomplete non-default entries are skipped, not stored.
    }

    if require_default && set.get(default_language).is_none() {
        return Err(ApiError::Validation(format!(
            "A complete translation for default language '{}' is required",
            default_language
        )));
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::ProductContent;

    fn content(name: &str, description: &str) -> ProductContent {
        ProductContent {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_sanitize_skips_incomplete_non_default() {
        let mut submitted = HashMap::new();
        submitted.insert("en".to_string(), content("Bamboo bowl", ""));
        submitted.insert("nl".to_string(), content("", "alleen beschrijving"));

        let set = sanitize_translations(submitted, "en", true).unwrap();
        assert!(set.get("en").is_some());
        assert!(set.get("nl").is_none());
    }

    #[test]
    fn test_sanitize_rejects_incomplete_default() {
        let mut submitted = HashMap::new();
        submitted.insert("en".to_string(), content("", "no name"));

        let result = sanitize_translations(submitted, "en", true);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_sanitize_requires_default_on_create() {
        let mut submitted = HashMap::new();
        submitted.insert("nl".to_string(), content("Bamboe kom", ""));

        let result = sanitize_translations(submitted, "en", true);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_sanitize_update_without_default_is_fine() {
        let mut submitted = HashMap::new();
        submitted.insert("nl".to_string(), content("Bamboe kom", ""));

        let set = sanitize_translations(submitted, "en", false).unwrap();
        assert!(set.get("nl").is_some());
    }

    #[test]
    fn test_sanitize_rejects_bad_language_code() {
        let mut submitted = HashMap::new();
        submitted.insert("EN".to_string(), content("Bamboo bowl", ""));

        let result = sanitize_translations(submitted, "en", true);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
