//! FAQ repository.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::entities::{FaqRowEntity, FaqTranslationEntity};
use crate::metrics::QueryTimer;
use domain::models::{Faq, FaqContent, TranslationSet};

/// Repository for FAQ rows and their translations.
#[derive(Clone)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    /// Creates a new FaqRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List FAQ entries with their translations in display order.
    pub async fn list(&self, only_active: bool) -> Result<Vec<Faq>, sqlx::Error> {
        let timer = QueryTimer::new("list_faqs");

        let rows = sqlx::query_as::<_, FaqRowEntity>(
            r#"
            SELECT id, sort_order, active, created_at, updated_at
            FROM faqs
            WHERE active = true OR $1 = false
            ORDER BY sort_order, id
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let translations = sqlx::query_as::<_, FaqTranslationEntity>(
            r#"
            SELECT faq_id, language_code, question, answer
            FROM faq_translations
            WHERE faq_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut grouped: HashMap<i64, Vec<FaqTranslationEntity>> = HashMap::new();
        for row in translations {
            grouped.entry(row.faq_id).or_default().push(row);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let translations = grouped.remove(&row.id).unwrap_or_default();
                row.into_faq(translations)
            })
            .collect())
    }

    /// Find a single FAQ entry with its translations.
    pub async fn find(&self, id: i64) -> Result<Option<Faq>, sqlx::Error> {
        let timer = QueryTimer::new("find_faq");

        let row = sqlx::query_as::<_, FaqRowEntity>(
            "SELECT id, sort_order, active, created_at, updated_at FROM faqs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            timer.record();
            return Ok(None);
        };

        let translations = sqlx::query_as::<_, FaqTranslationEntity>(
            "SELECT faq_id, language_code, question, answer FROM faq_translations WHERE faq_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        Ok(Some(row.into_faq(translations)))
    }

    /// Create an FAQ entry together with its translations, atomically.
    pub async fn create(
        &self,
        sort_order: i32,
        active: bool,
        translations: &TranslationSet<FaqContent>,
    ) -> Result<Faq, sqlx::Error> {
        let timer = QueryTimer::new("create_faq");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, FaqRowEntity>(
            r#"
            INSERT INTO faqs (sort_order, active)
            VALUES ($1, $2)
            RETURNING id, sort_order, active, created_at, updated_at
            "#,
        )
        .bind(sort_order)
        .bind(active)
        .fetch_one(&mut *tx)
        .await?;

        for (language, content) in translations.iter() {
            sqlx::query(
                r#"
                INSERT INTO faq_translations (faq_id, language_code, question, answer)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.id)
            .bind(language)
            .bind(&content.question)
            .bind(&content.answer)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        let id = row.id;
        let stored = sqlx::query_as::<_, FaqTranslationEntity>(
            "SELECT faq_id, language_code, question, answer FROM faq_translations WHERE faq_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(row.into_faq(stored))
    }

    /// Update base attributes and upsert the submitted translations,
    /// atomically. Returns None when the entry does not exist.
    pub async fn update(
        &self,
        id: i64,
        sort_order: Option<i32>,
        active: Option<bool>,
        translations: &TranslationSet<FaqContent>,
    ) -> Result<Option<Faq>, sqlx::Error> {
        let timer = QueryTimer::new("update_faq");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, FaqRowEntity>(
            r#"
            UPDATE faqs
            SET sort_order = COALESCE($2, sort_order),
                active = COALESCE($3, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, sort_order, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(sort_order)
        .bind(active)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        for (language, content) in translations.iter() {
            sqlx::query(
                r#"
                INSERT INTO faq_translations (faq_id, language_code, question, answer)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (faq_id, language_code)
                DO UPDATE SET question = $3, answer = $4
                "#,
            )
            .bind(id)
            .bind(language)
            .bind(&content.question)
            .bind(&content.answer)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        let stored = sqlx::query_as::<_, FaqTranslationEntity>(
            "SELECT faq_id, language_code, question, answer FROM faq_translations WHERE faq_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_faq(stored)))
    }

    /// Delete an FAQ entry. Translations cascade at the schema level.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_faq");
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
