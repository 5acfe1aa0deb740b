//! Language domain model.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    /// Lowercase ISO 639-1 code, optionally with a lowercase region
    /// subtag ("en", "nl", "pt-br").
    static ref LANGUAGE_CODE: Regex = Regex::new(r"^[a-z]{2}(-[a-z]{2})?$").unwrap();
}

/// Fallback when the languages table has no default row.
pub const FALLBACK_LANGUAGE: &str = "en";

/// A content language selectable by the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Language {
    pub code: String,
    pub name: String,
    /// Exactly one language is default at any time; it is the fallback
    /// target for translation resolution.
    pub is_default: bool,
    pub is_active: bool,
}

/// Validates a language code against the accepted format.
pub fn is_valid_language_code(code: &str) -> bool {
    LANGUAGE_CODE.is_match(code)
}

/// Custom validator wiring for request structs.
pub fn validate_language_code(code: &str) -> Result<(), validator::ValidationError> {
    if is_valid_language_code(code) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("language_code");
        err.message = Some("Language code must look like 'en' or 'pt-br'".into());
        Err(err)
    }
}

/// Request payload for registering a language.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateLanguageRequest {
    #[validate(custom(function = "validate_language_code"))]
    pub code: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Request payload for updating a language's name or availability.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateLanguageRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    pub is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}
