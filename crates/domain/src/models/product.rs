//! Product domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::translation::{fallback_field, LocalizedFields, TranslationSet};

/// A catalog product. Base attributes are language-independent; localized
/// fields live in the translation set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Product {
    pub id: i64,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub translations: TranslationSet<ProductContent>,
}

/// Localized product fields. `name` is required, `description` optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductContent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl LocalizedFields for ProductContent {
    fn merge_missing_from(&mut self, fallback: &Self) {
        fallback_field(&mut self.name, &fallback.name);
        fallback_field(&mut self.description, &fallback.description);
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Request payload for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateProductRequest {
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_cents: i64,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,

    /// Localized fields keyed by language code. The default language must
    /// be complete; incomplete entries for other languages are skipped.
    pub translations: HashMap<String, ProductContent>,
}

/// Request payload for updating a product. Base fields are partial;
/// submitted translations are upserted per language.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProductRequest {
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price_cents: Option<i64>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    pub active: Option<bool>,

    #[serde(default)]
    pub translations: HashMap<String, ProductContent>,
}

/// Public storefront view: merged content for one language only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
}

impl ProductView {
    pub fn resolve(product: &Product, requested: &str, default: &str) -> Self {
        let content = product.translations.resolve(requested, default);
        Self {
            id: product.id,
            name: content.name,
            description: content.description,
            price_cents: product.price_cents,
            image_url: product.image_url.clone(),
        }
    }
}

/// Admin view: merged content plus the full per-language sidecar for
/// editing UIs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub active: bool,
    pub translations: TranslationSet<ProductContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminProductView {
    pub fn resolve(product: Product, requested: &str, default: &str) -> Self {
        let content = product.translations.resolve(requested, default);
        Self {
            id: product.id,
            name: content.name,
            description: content.description,
            price_cents: product.price_cents,
            image_url: product.image_url,
            active: product.active,
            translations: product.translations,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product() -> Product {
        let mut translations = TranslationSet::new();
        translations.insert(
            "en",
            ProductContent {
                name: "Bamboo cutting board".to_string(),
                description: "End-grain, 40x30cm".to_string(),
            },
        );
        translations.insert(
            "nl",
            ProductContent {
                name: "Bamboe snijplank".to_string(),
                description: String::new(),
            },
        );
        Product {
            id: 7,
            price_cents: 2495,
            image_url: Some("https://cdn.example.com/board.jpg".to_string()),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            translations,
        }
    }

    #[test]
    fn test_public_view_merges_with_fallback() {
        let view = ProductView::resolve(&test_product(), "nl", "en");
        assert_eq!(view.name, "Bamboe snijplank");
        // Empty description falls back to the default language.
        assert_eq!(view.description, "End-grain, 40x30cm");
        assert_eq!(view.price_cents, 2495);
    }

    #[test]
    fn test_admin_view_keeps_translation_sidecar() {
        let view = AdminProductView::resolve(test_product(), "en", "en");
        assert_eq!(view.name, "Bamboo cutting board");
        assert_eq!(view.translations.languages().count(), 2);
        assert_eq!(
            view.translations.get("nl").map(|c| c.name.as_str()),
            Some("Bamboe snijplank")
        );
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateProductRequest {
            price_cents: -1,
            image_url: None,
            active: true,
            translations: HashMap::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_content_completeness() {
        let complete = ProductContent {
            name: "Bamboo straw set".to_string(),
            description: String::new(),
        };
        assert!(complete.is_complete());

        let incomplete = ProductContent {
            name: String::new(),
            description: "description without a name".to_string(),
        };
        assert!(!incomplete.is_complete());
    }
}
