//! Blog post domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::translation::{fallback_field, LocalizedFields, TranslationSet};

/// A blog post with per-language title and body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Blog {
    pub id: i64,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub translations: TranslationSet<BlogContent>,
}

/// Localized blog fields. Both title and content are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BlogContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl LocalizedFields for BlogContent {
    fn merge_missing_from(&mut self, fallback: &Self) {
        fallback_field(&mut self.title, &fallback.title);
        fallback_field(&mut self.content, &fallback.content);
    }

    fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// Request payload for creating a blog post.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateBlogRequest {
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    pub published_at: Option<NaiveDate>,

    #[serde(default = "default_active")]
    pub active: bool,

    pub translations: HashMap<String, BlogContent>,
}

/// Request payload for updating a blog post.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateBlogRequest {
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    pub published_at: Option<NaiveDate>,

    pub active: Option<bool>,

    #[serde(default)]
    pub translations: HashMap<String, BlogContent>,
}

/// Public storefront view of a blog post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BlogView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDate>,
}

impl BlogView {
    pub fn resolve(blog: &Blog, requested: &str, default: &str) -> Self {
        let content = blog.translations.resolve(requested, default);
        Self {
            id: blog.id,
            title: content.title,
            content: content.content,
            image_url: blog.image_url.clone(),
            published_at: blog.published_at,
        }
    }
}

/// Admin view with the per-language sidecar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminBlogView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub active: bool,
    pub translations: TranslationSet<BlogContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminBlogView {
    pub fn resolve(blog: Blog, requested: &str, default: &str) -> Self {
        let content = blog.translations.resolve(requested, default);
        Self {
            id: blog.id,
            title: content.title,
            content: content.content,
            image_url: blog.image_url,
            published_at: blog.published_at,
            active: blog.active,
            translations: blog.translations,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_content_requires_both_fields() {
        let complete = BlogContent {
            title: "Why bamboo".to_string(),
            content: "Because it grows a meter a day.".to_string(),
        };
        assert!(complete.is_complete());

        let title_only = BlogContent {
            title: "Why bamboo".to_string(),
            content: String::new(),
        };
        assert!(!title_only.is_complete());
    }

    #[test]
    fn test_blog_view_field_fallback() {
        let mut translations = TranslationSet::new();
        translations.insert(
            "en",
            BlogContent {
                title: "Why bamboo".to_string(),
                content: "Because it grows a meter a day.".to_string(),
            },
        );
        translations.insert(
            "nl",
            BlogContent {
                title: "Waarom bamboe".to_string(),
                content: String::new(),
            },
        );
        let blog = Blog {
            id: 1,
            image_url: None,
            published_at: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            translations,
        };

        let view = BlogView::resolve(&blog, "nl", "en");
        assert_eq!(view.title, "Waarom bamboe");
        assert_eq!(view.content, "Because it grows a meter a day.");
    }
}
