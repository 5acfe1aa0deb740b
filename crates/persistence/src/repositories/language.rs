//! Language repository.

use sqlx::PgPool;

use crate::entities::LanguageEntity;
use crate::metrics::QueryTimer;

/// Repository for language rows.
#[derive(Clone)]
pub struct LanguageRepository {
    pool: PgPool,
}

impl LanguageRepository {
    /// Creates a new LanguageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All languages, default first.
    pub async fn list_all(&self) -> Result<Vec<LanguageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_languages");
        let result = sqlx::query_as::<_, LanguageEntity>(
            "SELECT code, name, is_default, is_active FROM languages ORDER BY is_default DESC, code",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Active languages, selectable by the storefront.
    pub async fn list_active(&self) -> Result<Vec<LanguageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_languages");
        let result = sqlx::query_as::<_, LanguageEntity>(
            r#"
            SELECT code, name, is_default, is_active
            FROM languages
            WHERE is_active = true
            ORDER BY is_default DESC, code
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a language by code.
    pub async fn find(&self, code: &str) -> Result<Option<LanguageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_language");
        let result = sqlx::query_as::<_, LanguageEntity>(
            "SELECT code, name, is_default, is_active FROM languages WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The current default language code, if any row is marked default.
    pub async fn default_code(&self) -> Result<Option<String>, sqlx::Error> {
        let timer = QueryTimer::new("default_language_code");
        let result =
            sqlx::query_scalar::<_, String>("SELECT code FROM languages WHERE is_default = true")
                .fetch_optional(&self.pool)
                .await;
        timer.record();
        result
    }

    /// Register a new language. The first language ever registered becomes
    /// the default automatically.
    pub async fn create(
        &self,
        code: &str,
        name: &str,
        is_active: bool,
    ) -> Result<LanguageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_language");
        let result = sqlx::query_as::<_, LanguageEntity>(
            r#"
            INSERT INTO languages (code, name, is_default, is_active)
            VALUES ($1, $2, NOT EXISTS (SELECT 1 FROM languages WHERE is_default = true), $3)
            RETURNING code, name, is_default, is_active
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a language's display name and/or availability.
    pub async fn update(
        &self,
        code: &str,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<LanguageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_language");
        let result = sqlx::query_as::<_, LanguageEntity>(
            r#"
            UPDATE languages
            SET name = COALESCE($2, name),
                is_active = COALESCE($3, is_active)
            WHERE code = $1
            RETURNING code, name, is_default, is_active
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Make `code` the single default language.
    ///
    /// Clearing the previous default and setting the new one happen in one
    /// transaction so the exactly-one-default invariant holds at every
    /// commit point. Returns None when the language does not exist.
    pub async fn set_default(&self, code: &str) -> Result<Option<LanguageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_default_language");

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE languages SET is_default = false WHERE is_default = true AND code <> $1")
            .bind(code)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query_as::<_, LanguageEntity>(
            r#"
            UPDATE languages
            SET is_default = true, is_active = true
            WHERE code = $1
            RETURNING code, name, is_default, is_active
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        match updated {
            Some(entity) => {
                tx.commit().await?;
                timer.record();
                Ok(Some(entity))
            }
            None => {
                tx.rollback().await?;
                timer.record();
                Ok(None)
            }
        }
    }
}
