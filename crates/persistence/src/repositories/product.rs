//! Product repository.
//!
//! Base row and translation writes always share one transaction: either
//! the product and every submitted translation land together, or nothing
//! does.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::entities::{ProductRowEntity, ProductTranslationEntity};
use crate::metrics::QueryTimer;
use domain::models::{Product, ProductContent, TranslationSet};

/// Repository for product rows and their translations.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products with their translations. `only_active` filters to the
    /// public storefront subset.
    pub async fn list(&self, only_active: bool) -> Result<Vec<Product>, sqlx::Error> {
        let timer = QueryTimer::new("list_products");

        let rows = sqlx::query_as::<_, ProductRowEntity>(
            r#"
            SELECT id, price_cents, image_url, active, created_at, updated_at
            FROM products
            WHERE active = true OR $1 = false
            ORDER BY id
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let translations = sqlx::query_as::<_, ProductTranslationEntity>(
            r#"
            SELECT product_id, language_code, name, description
            FROM product_translations
            WHERE product_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut grouped: HashMap<i64, Vec<ProductTranslationEntity>> = HashMap::new();
        for row in translations {
            grouped.entry(row.product_id).or_default().push(row);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let translations = grouped.remove(&row.id).unwrap_or_default();
                row.into_product(translations)
            })
            .collect())
    }

    /// Find a single product with its translations.
    pub async fn find(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
        let timer = QueryTimer::new("find_product");

        let row = sqlx::query_as::<_, ProductRowEntity>(
            r#"
            SELECT id, price_cents, image_url, active, created_at, updated_at
            FROM products
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

        let translations = sqlx::query_as::<_, ProductTranslationEntity>(
            r#"
            SELECT product_id, language_code, name, description
            FROM product_translations
            WHERE product_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        Ok(Some(row.into_product(translations)))
    }

    /// Create a product together with its translations, atomically.
    pub async fn create(
        &self,
        price_cents: i64,
        image_url: Option<&str>,
        active: bool,
        translations: &TranslationSet<ProductContent>,
    ) -> Result<Product, sqlx::Error> {
        let timer = QueryTimer::new("create_product");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRowEntity>(
            r#"
            INSERT INTO products (price_cents, image_url, active)
            VALUES ($1, $2, $3)
            RETURNING id, price_cents, image_url, active, created_at, updated_at
            "#,
        )
        .bind(price_cents)
        .bind(image_url)
        .bind(active)
        .fetch_one(&mut *tx)
        .await?;

        for (language, content) in translations.iter() {
            sqlx::query(
                r#"
                INSERT INTO product_translations (product_id, language_code, name, description)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.id)
            .bind(language)
            .bind(&content.name)
            .bind(&content.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        let id = row.id;
        let stored = sqlx::query_as::<_, ProductTranslationEntity>(
            "SELECT product_id, language_code, name, description FROM product_translations WHERE product_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(row.into_product(stored))
    }

    /// Update base attributes and upsert the submitted translations,
    /// atomically. Returns None when the product does not exist.
    pub async fn update(
        &self,
        id: i64,
        price_cents: Option<i64>,
        image_url: Option<&str>,
        active: Option<bool>,
        translations: &TranslationSet<ProductContent>,
    ) -> Result<Option<Product>, sqlx::Error> {
        let timer = QueryTimer::new("update_product");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRowEntity>(
            r#"
            UPDATE products
            SET price_cents = COALESCE($2, price_cents),
                image_url = COALESCE($3, image_url),
                active = COALESCE($4, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, price_cents, image_url, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(price_cents)
        .bind(image_url)
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
                INSERT INTO product_translations (product_id, language_code, name, description)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (product_id, language_code)
                DO UPDATE SET name = $3, description = $4
                "#,
            )
            .bind(id)
            .bind(language)
            .bind(&content.name)
            .bind(&content.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        let stored = sqlx::query_as::<_, ProductTranslationEntity>(
            "SELECT product_id, language_code, name, description FROM product_translations WHERE product_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_product(stored)))
    }

    /// Delete a product. Translations cascade at the schema level.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_product");
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
