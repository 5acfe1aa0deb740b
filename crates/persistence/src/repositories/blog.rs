//! Blog repository.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::entities::{BlogRowEntity, BlogTranslationEntity};
use crate::metrics::QueryTimer;
use domain::models::{Blog, BlogContent, TranslationSet};

/// Repository for blog rows and their translations.
#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Creates a new BlogRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List blog posts with their translations, newest first.
    pub async fn list(&self, only_active: bool) -> Result<Vec<Blog>, sqlx::Error> {
        let timer = QueryTimer::new("list_blogs");

        let rows = sqlx::query_as::<_, BlogRowEntity>(
            r#"
            SELECT id, image_url, published_at, active, created_at, updated_at
            FROM blogs
            WHERE active = true OR $1 = false
            ORDER BY published_at DESC NULLS LAST, id DESC
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let translations = sqlx::query_as::<_, BlogTranslationEntity>(
            r#"
            SELECT blog_id, language_code, title, content
            FROM blog_translations
            WHERE blog_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut grouped: HashMap<i64, Vec<BlogTranslationEntity>> = HashMap::new();
        for row in translations {
            grouped.entry(row.blog_id).or_default().push(row);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let translations = grouped.remove(&row.id).unwrap_or_default();
                row.into_blog(translations)
            })
            .collect())
    }

    /// Find a single blog post with its translations.
    pub async fn find(&self, id: i64) -> Result<Option<Blog>, sqlx::Error> {
        let timer = QueryTimer::new("find_blog");

        let row = sqlx::query_as::<_, BlogRowEntity>(
            r#"
            SELECT id, image_url, published_at, active, created_at, updated_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            timer.record();
            return Ok(None);
        };

        let translations = sqlx::query_as::<_, BlogTranslationEntity>(
            "SELECT blog_id, language_code, title, content FROM blog_translations WHERE blog_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        Ok(Some(row.into_blog(translations)))
    }

    /// Create a blog post together with its translations, atomically.
    pub async fn create(
        &self,
        image_url: Option<&str>,
        published_at: Option<NaiveDate>,
        active: bool,
        translations: &TranslationSet<BlogContent>,
    ) -> Result<Blog, sqlx::Error> {
        let timer = QueryTimer::new("create_blog");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BlogRowEntity>(
            r#"
            INSERT INTO blogs (image_url, published_at, active)
            VALUES ($1, $2, $3)
            RETURNING id, image_url, published_at, active, created_at, updated_at
            "#,
        )
        .bind(image_url)
        .bind(published_at)
        .bind(active)
        .fetch_one(&mut *tx)
        .await?;

        for (language, content) in translations.iter() {
            sqlx::query(
                r#"
                INSERT INTO blog_translations (blog_id, language_code, title, content)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.id)
            .bind(language)
            .bind(&content.title)
            .bind(&content.content)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        let id = row.id;
        let stored = sqlx::query_as::<_, BlogTranslationEntity>(
            "SELECT blog_id, language_code, title, content FROM blog_translations WHERE blog_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(row.into_blog(stored))
    }

    /// Update base attributes and upsert the submitted translations,
    /// atomically. Returns None when the post does not exist.
    pub async fn update(
        &self,
        id: i64,
        image_url: Option<&str>,
        published_at: Option<NaiveDate>,
        active: Option<bool>,
        translations: &TranslationSet<BlogContent>,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let timer = QueryTimer::new("update_blog");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BlogRowEntity>(
            r#"
            UPDATE blogs
            SET image_url = COALESCE($2, image_url),
                published_at = COALESCE($3, published_at),
                active = COALESCE($4, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, image_url, published_at, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(image_url)
        .bind(published_at)
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
                INSERT INTO blog_translations (blog_id, language_code, title, content)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (blog_id, language_code)
                DO UPDATE SET title = $3, content = $4
                "#,
            )
            .bind(id)
            .bind(language)
            .bind(&content.title)
            .bind(&content.content)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        let stored = sqlx::query_as::<_, BlogTranslationEntity>(
            "SELECT blog_id, language_code, title, content FROM blog_translations WHERE blog_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_blog(stored)))
    }

    /// Delete a blog post. Translations cascade at the schema level.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_blog");
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
