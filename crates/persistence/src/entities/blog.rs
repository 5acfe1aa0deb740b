//! Blog entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use domain::models::{Blog, BlogContent, TranslationSet};

/// Database row mapping for the blogs table (base attributes only).
#[derive(Debug, Clone, FromRow)]
pub struct BlogRowEntity {
    pub id: i64,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row mapping for the blog_translations table.
#[derive(Debug, Clone, FromRow)]
pub struct BlogTranslationEntity {
    pub blog_id: i64,
    pub language_code: String,
    pub title: String,
    pub content: String,
}

impl BlogRowEntity {
    /// Assemble the domain model from the base row and its translations.
    pub fn into_blog(self, translations: Vec<BlogTranslationEntity>) -> Blog {
        let mut set = TranslationSet::new();
        for row in translations {
            set.insert(
                row.language_code,
                BlogContent {
                    title: row.title,
                    content: row.content,
                },
            );
        }
        Blog {
            id: self.id,
            image_url: self.image_url,
            published_at: self.published_at,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            translations: set,
        }
    }
}
