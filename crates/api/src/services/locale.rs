//! Request locale resolution.
//!
//! Public catalog endpoints accept a `lang` query parameter. The resolved
//! locale pairs the requested language with the configured default so
//! translation lookup can fall back field by field.

use persistence::repositories::LanguageRepository;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::warn;

use domain::models::{is_valid_language_code, FALLBACK_LANGUAGE};

/// Query parameters shared by public catalog endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub lang: Option<String>,
}

/// The language pair a catalog read resolves translations against.
#[derive(Debug, Clone)]
pub struct Locale {
    /// What the caller asked for.
    pub requested: String,
    /// The store default, target of field-level fallback.
    pub default: String,
}

/// Resolves the locale for a request.
///
/// Unknown or malformed `lang` values quietly resolve to the default
/// language rather than erroring; the storefront always gets content.
pub async fn resolve_locale(pool: &PgPool, query: &LocaleQuery) -> Locale {
    let repository = LanguageRepository::new(pool.clone());

    let default = match repository.default_code().await {
        Ok(Some(code)) => code,
        Ok(None) => FALLBACK_LANGUAGE.to_string(),
        Err(err) => {
            warn!(error = %err, "Default language lookup failed, using fallback");
            FALLBACK_LANGUAGE.to_string()
        }
    };

    let requested = query
        .lang
        .as_deref()
        .filter(|code| is_valid_language_code(code))
        .map(|code| code.to_string())
        .unwrap_or_else(|| default.clone());

    Locale { requested, default }
}
