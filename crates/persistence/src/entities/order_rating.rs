//! Order rating entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::OrderRating;

/// Database row mapping for the order_ratings table.
///
/// `product_id` is NULL for the overall order rating.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRatingEntity {
    pub id: i64,
    pub order_id: Uuid,
    pub product_id: Option<i64>,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRatingEntity> for OrderRating {
    fn from(entity: OrderRatingEntity) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            product_id: entity.product_id,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }
}
