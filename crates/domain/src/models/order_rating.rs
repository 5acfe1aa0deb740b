//! Order rating domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::token::RatingToken;
use uuid::Uuid;
use validator::Validate;

use super::order::OrderItem;

/// A single rating row. `product_id` is `None` for the overall order
/// rating and `Some` for a per-product rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OrderRating {
    pub id: i64,
    pub order_id: Uuid,
    pub product_id: Option<i64>,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for the public rating submission endpoint.
///
/// Authorization is possession of the token; no user identity is checked.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitRatingRequest {
    pub order_id: Uuid,

    pub rating_token: RatingToken,

    #[validate(range(min = 1, max = 5, message = "Overall rating must be between 1 and 5"))]
    pub overall_rating: i16,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub overall_comment: Option<String>,

    #[validate(length(min = 1, message = "At least one product rating is required"))]
    pub product_ratings: Vec<ProductRatingInput>,
}

/// One per-product rating within a submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ProductRatingInput {
    pub product_id: i64,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

/// What the public rating page sees when it looks an order up by token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RatingOrderView {
    pub order_id: Uuid,
    pub user_name: String,
    pub total_cents: i64,
    pub ordered_on: NaiveDate,
    pub items: Vec<OrderItem>,
}
