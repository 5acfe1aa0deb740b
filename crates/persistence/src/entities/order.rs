//! Order entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Order, OrderItem};
use shared::token::RatingToken;

/// Database row mapping for the orders table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub total_cents: i64,
    pub payment_status: String,
    pub rating_token: Option<Uuid>,
    pub send_rating_email_date: Option<NaiveDate>,
    pub rating_email_sent: bool,
    pub rating_token_used: bool,
    pub created_at: DateTime<Utc>,
}

/// Database row mapping for the order_items table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemEntity {
    pub order_id: Uuid,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl From<OrderEntity> for Order {
    fn from(entity: OrderEntity) -> Self {
        Self {
            id: entity.id,
            user_email: entity.user_email,
            user_name: entity.user_name,
            total_cents: entity.total_cents,
            payment_status: entity.payment_status,
            rating_token: entity.rating_token.map(RatingToken::from),
            send_rating_email_date: entity.send_rating_email_date,
            rating_email_sent: entity.rating_email_sent,
            rating_token_used: entity.rating_token_used,
            created_at: entity.created_at,
        }
    }
}

impl From<OrderItemEntity> for OrderItem {
    fn from(entity: OrderItemEntity) -> Self {
        Self {
            product_id: entity.product_id,
            quantity: entity.quantity,
            unit_price_cents: entity.unit_price_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::order::RatingState;

    fn test_entity() -> OrderEntity {
        OrderEntity {
            id: Uuid::new_v4(),
            user_email: "jo@example.com".to_string(),
            user_name: "Jo".to_string(),
            total_cents: 3490,
            payment_status: "paid".to_string(),
            rating_token: Some(Uuid::new_v4()),
            send_rating_email_date: None,
            rating_email_sent: false,
            rating_token_used: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_entity_conversion() {
        let entity = test_entity();
        let token = entity.rating_token;
        let order: Order = entity.into();

        assert_eq!(order.rating_token.map(|t| t.as_uuid()), token);
        assert_eq!(order.rating_state(), RatingState::PendingSend);
    }

    #[test]
    fn test_order_entity_without_token() {
        let mut entity = test_entity();
        entity.rating_token = None;
        let order: Order = entity.into();
        assert_eq!(order.rating_state(), RatingState::NoToken);
    }
}
