//! Order rating repository.
//!
//! The submission path is the single-use gate for rating tokens: the order
//! row is locked (`SELECT ... FOR UPDATE`) before the used flag is checked,
//! so two concurrent submissions for the same token serialize and at most
//! one commits.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::OrderRatingEntity;
use crate::metrics::QueryTimer;
use domain::models::order_rating::ProductRatingInput;
use shared::token::RatingToken;

/// A validated rating submission ready to persist.
#[derive(Debug, Clone)]
pub struct RatingSubmission {
    pub order_id: Uuid,
    pub rating_token: RatingToken,
    pub overall_rating: i16,
    pub overall_comment: Option<String>,
    pub product_ratings: Vec<ProductRatingInput>,
}

/// Result of attempting a rating submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Ratings stored, token consumed.
    Created,
    /// No order matches the (order id, token) pair jointly.
    NotFound,
    /// The token was already consumed by an earlier submission.
    AlreadyRated,
}

/// Repository for order rating rows.
#[derive(Clone)]
pub struct OrderRatingRepository {
    pool: PgPool,
}

impl OrderRatingRepository {
    /// Creates a new OrderRatingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a submission: one overall row, one row per product rating,
    /// and the token-used flip, all in a single transaction.
    ///
    /// Any insert failing rolls the whole submission back; no partial
    /// ratings persist and the token stays unconsumed.
    pub async fn submit(
        &self,
        submission: &RatingSubmission,
    ) -> Result<SubmissionOutcome, sqlx::Error> {
        let timer = QueryTimer::new("submit_rating");

        let mut tx = self.pool.begin().await?;

        // Lock the order row while holding the used-flag check open. Both
        // id and token must match jointly.
        let used = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT rating_token_used
            FROM orders
            WHERE id = $1 AND rating_token = $2
            FOR UPDATE
            "#,
        )
        .bind(submission.order_id)
        .bind(submission.rating_token.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let used = match used {
            Some(used) => used,
            None => {
                tx.rollback().await?;
                timer.record();
                return Ok(SubmissionOutcome::NotFound);
            }
        };

        if used {
            tx.rollback().await?;
            timer.record();
            return Ok(SubmissionOutcome::AlreadyRated);
        }

        sqlx::query(
            r#"
            INSERT INTO order_ratings (order_id, product_id, rating, comment)
            VALUES ($1, NULL, $2, $3)
            "#,
        )
        .bind(submission.order_id)
        .bind(submission.overall_rating)
        .bind(&submission.overall_comment)
        .execute(&mut *tx)
        .await?;

        for product_rating in &submission.product_ratings {
            sqlx::query(
                r#"
                INSERT INTO order_ratings (order_id, product_id, rating, comment)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(submission.order_id)
            .bind(product_rating.product_id)
            .bind(product_rating.rating)
            .bind(&product_rating.comment)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE orders SET rating_token_used = true WHERE id = $1")
            .bind(submission.order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();

        Ok(SubmissionOutcome::Created)
    }

    /// All rating rows for an order, overall rating first.
    pub async fn list_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderRatingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_ratings_for_order");
        let result = sqlx::query_as::<_, OrderRatingEntity>(
            r#"
            SELECT id, order_id, product_id, rating, comment, created_at
            FROM order_ratings
            WHERE order_id = $1
            ORDER BY product_id NULLS FIRST, id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
