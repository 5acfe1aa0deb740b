//! Order repository.

use chrono::NaiveDate;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{OrderEntity, OrderItemEntity};
use crate::metrics::QueryTimer;
use shared::token::RatingToken;

/// Errors from order creation beyond plain database failures.
#[derive(Debug, Error)]
pub enum OrderCreateError {
    #[error("Product {0} does not exist or is not for sale")]
    UnknownProduct(i64),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// One line item in a checkout, prior to pricing.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i32,
}

/// Repository for orders and their line items.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its line items in one transaction.
    ///
    /// Prices are read from the products table inside the transaction so
    /// the stored unit price matches the catalog at checkout time. The
    /// rating token and send date are computed by the caller from the
    /// feature flags.
    pub async fn create(
        &self,
        user_email: &str,
        user_name: &str,
        items: &[NewOrderItem],
        rating_token: Option<RatingToken>,
        send_rating_email_date: Option<NaiveDate>,
    ) -> Result<OrderEntity, OrderCreateError> {
        let timer = QueryTimer::new("create_order");

        let mut tx = self.pool.begin().await?;

        let mut priced: Vec<(i64, i32, i64)> = Vec::with_capacity(items.len());
        let mut total_cents: i64 = 0;
        for item in items {
            let price = sqlx::query_scalar::<_, i64>(
                "SELECT price_cents FROM products WHERE id = $1 AND active = true",
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(OrderCreateError::UnknownProduct(item.product_id))?;

            total_cents += price * i64::from(item.quantity);
            priced.push((item.product_id, item.quantity, price));
        }

        let order = sqlx::query_as::<_, OrderEntity>(
            r#"
            INSERT INTO orders
                (user_email, user_name, total_cents, payment_status,
                 rating_token, send_rating_email_date)
            VALUES ($1, $2, $3, 'pending', $4, $5)
            RETURNING id, user_email, user_name, total_cents, payment_status,
                      rating_token, send_rating_email_date, rating_email_sent,
                      rating_token_used, created_at
            "#,
        )
        .bind(user_email)
        .bind(user_name)
        .bind(total_cents)
        .bind(rating_token.map(|t| t.as_uuid()))
        .bind(send_rating_email_date)
        .fetch_one(&mut *tx)
        .await?;

        for (product_id, quantity, unit_price_cents) in priced {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order.id)
            .bind(product_id)
            .bind(quantity)
            .bind(unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();

        Ok(order)
    }

    /// Find an order by id.
    pub async fn find(&self, id: Uuid) -> Result<Option<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_order");
        let result = sqlx::query_as::<_, OrderEntity>(
            r#"
            SELECT id, user_email, user_name, total_cents, payment_status,
                   rating_token, send_rating_email_date, rating_email_sent,
                   rating_token_used, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an order by its rating token.
    pub async fn find_by_rating_token(
        &self,
        token: RatingToken,
    ) -> Result<Option<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_order_by_rating_token");
        let result = sqlx::query_as::<_, OrderEntity>(
            r#"
            SELECT id, user_email, user_name, total_cents, payment_status,
                   rating_token, send_rating_email_date, rating_email_sent,
                   rating_token_used, created_at
            FROM orders
            WHERE rating_token = $1
            "#,
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Line items of an order.
    pub async fn items(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("order_items");
        let result = sqlx::query_as::<_, OrderItemEntity>(
            r#"
            SELECT order_id, product_id, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = $1
            ORDER BY product_id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Orders whose rating email is due and not yet sent.
    ///
    /// Orders already marked sent are excluded, which makes back-to-back
    /// sweep runs within the same day no-ops for them.
    pub async fn find_due_rating_emails(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_due_rating_emails");
        let result = sqlx::query_as::<_, OrderEntity>(
            r#"
            SELECT id, user_email, user_name, total_cents, payment_status,
                   rating_token, send_rating_email_date, rating_email_sent,
                   rating_token_used, created_at
            FROM orders
            WHERE send_rating_email_date IS NOT NULL
              AND send_rating_email_date <= $1
              AND rating_email_sent = false
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark an order's rating email as sent. Only called after the email
    /// transport reported success; failed sends stay unmarked so the next
    /// day's sweep retries them.
    pub async fn mark_rating_email_sent(&self, order_id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("mark_rating_email_sent");
        let result = sqlx::query(
            "UPDATE orders SET rating_email_sent = true WHERE id = $1 AND rating_email_sent = false",
        )
        .bind(order_id)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ())
    }
}
