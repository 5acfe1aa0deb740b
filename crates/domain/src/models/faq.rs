//! FAQ entry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::translation::{fallback_field, LocalizedFields, TranslationSet};

/// A frequently-asked question shown on the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Faq {
    pub id: i64,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub translations: TranslationSet<FaqContent>,
}

/// Localized FAQ fields. Question and answer are both required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FaqContent {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl LocalizedFields for FaqContent {
    fn merge_missing_from(&mut self, fallback: &Self) {
        fallback_field(&mut self.question, &fallback.question);
        fallback_field(&mut self.answer, &fallback.answer);
    }

    fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// Request payload for creating an FAQ entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateFaqRequest {
    #[serde(default)]
    pub sort_order: i32,

    #[serde(default = "default_active")]
    pub active: bool,

    pub translations: HashMap<String, FaqContent>,
}

/// Request payload for updating an FAQ entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateFaqRequest {
    pub sort_order: Option<i32>,

    pub active: Option<bool>,

    #[serde(default)]
    pub translations: HashMap<String, FaqContent>,
}

/// Public storefront view of an FAQ entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FaqView {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

impl FaqView {
    pub fn resolve(faq: &Faq, requested: &str, default: &str) -> Self {
        let content = faq.translations.resolve(requested, default);
        Self {
            id: faq.id,
            question: content.question,
            answer: content.answer,
        }
    }
}

/// Admin view with the per-language sidecar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminFaqView {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub active: bool,
    pub translations: TranslationSet<FaqContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminFaqView {
    pub fn resolve(faq: Faq, requested: &str, default: &str) -> Self {
        let content = faq.translations.resolve(requested, default);
        Self {
            id: faq.id,
            question: content.question,
            answer: content.answer,
            sort_order: faq.sort_order,
            active: faq.active,
            translations: faq.translations,
            created_at: faq.created_at,
            updated_at: faq.updated_at,
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
    fn test_faq_content_requires_question_and_answer() {
        let complete = FaqContent {
            question: "How do I clean a bamboo board?".to_string(),
            answer: "Warm water, mild soap, oil monthly.".to_string(),
        };
        assert!(complete.is_complete());

        let question_only = FaqContent {
            question: "How do I clean a bamboo board?".to_string(),
            answer: "  ".to_string(),
        };
        assert!(!question_only.is_complete());
    }

    #[test]
    fn test_faq_view_falls_back_to_default_language() {
        let mut translations = TranslationSet::new();
        translations.insert(
            "en",
            FaqContent {
                question: "Do you ship abroad?".to_string(),
                answer: "Yes, within the EU.".to_string(),
            },
        );
        let faq = Faq {
            id: 3,
            sort_order: 1,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            translations,
        };

        let view = FaqView::resolve(&faq, "nl", "en");
        assert_eq!(view.question, "Do you ship abroad?");
        assert_eq!(view.answer, "Yes, within the EU.");
    }
}
