//! Product entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Product, ProductContent, TranslationSet};

/// Database row mapping for the products table (base attributes only).
#[derive(Debug, Clone, FromRow)]
pub struct ProductRowEntity {
    pub id: i64,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row mapping for the product_translations table.
///
/// UNIQUE (product_id, language_code) is enforced by the schema.
#[derive(Debug, Clone, FromRow)]
pub struct ProductTranslationEntity {
    pub product_id: i64,
    pub language_code: String,
    pub name: String,
    pub description: String,
}

impl ProductRowEntity {
    /// Assemble the domain model from the base row and its translations.
    pub fn into_product(self, translations: Vec<ProductTranslationEntity>) -> Product {
        let mut set = TranslationSet::new();
        for row in translations {
            set.insert(
                row.language_code,
                ProductContent {
                    name: row.name,
                    description: row.description,
                },
            );
        }
        Product {
            id: self.id,
            price_cents: self.price_cents,
            image_url: self.image_url,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            translations: set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_product_groups_translations() {
        let row = ProductRowEntity {
            id: 9,
            price_cents: 1250,
            image_url: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let translations = vec![
            ProductTranslationEntity {
                product_id: 9,
                language_code: "en".to_string(),
                name: "Bamboo straw set".to_string(),
                description: "Set of six".to_string(),
            },
            ProductTranslationEntity {
                product_id: 9,
                language_code: "nl".to_string(),
                name: "Bamboe rietjes".to_string(),
                description: String::new(),
            },
        ];

        let product = row.into_product(translations);
        assert_eq!(product.id, 9);
        assert_eq!(product.translations.languages().count(), 2);
        assert_eq!(
            product.translations.get("en").map(|c| c.name.as_str()),
            Some("Bamboo straw set")
        );
    }
}
