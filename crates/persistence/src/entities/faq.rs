//! FAQ entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Faq, FaqContent, TranslationSet};

/// Database row mapping for the faqs table (base attributes only).
#[derive(Debug, Clone, FromRow)]
pub struct FaqRowEntity {
    pub id: i64,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row mapping for the faq_translations table.
#[derive(Debug, Clone, FromRow)]
pub struct FaqTranslationEntity {
    pub faq_id: i64,
    pub language_code: String,
    pub question: String,
    pub answer: String,
}

impl FaqRowEntity {
    /// Assemble the domain model from the base row and its translations.
    pub fn into_faq(self, translations: Vec<FaqTranslationEntity>) -> Faq {
        let mut set = TranslationSet::new();
        for row in translations {
            set.insert(
                row.language_code,
                FaqContent {
                    question: row.question,
                    answer: row.answer,
                },
            );
        }
        Faq {
            id: self.id,
            sort_order: self.sort_order,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            translations: set,
        }
    }
}
