//! Order domain model and rating token lifecycle.
//!
//! Orders move through four rating states: `NoToken` (rating feature off at
//! creation), `PendingSend` (token issued, email not yet sent), `Sent`
//! (rating email dispatched) and `Used` (rating submitted). The transitions
//! are driven by order creation, the daily email sweep and the public
//! rating submission endpoint.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::token::RatingToken;
use uuid::Uuid;
use validator::Validate;

use super::feature_settings::FeatureFlags;

/// A customer order. Customers may be guests, so the order carries contact
/// details rather than a mandatory account reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Order {
    pub id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub total_cents: i64,
    pub payment_status: String,
    /// Bearer capability for the post-purchase rating page. Never
    /// serialized in order responses; rendered only into the rating email.
    #[serde(skip_serializing)]
    pub rating_token: Option<RatingToken>,
    pub send_rating_email_date: Option<NaiveDate>,
    pub rating_email_sent: bool,
    pub rating_token_used: bool,
    pub created_at: DateTime<Utc>,
}

/// A line item on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

/// Rating state of an order, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingState {
    NoToken,
    PendingSend,
    Sent,
    Used,
}

impl Order {
    pub fn rating_state(&self) -> RatingState {
        match (
            self.rating_token.is_some(),
            self.rating_email_sent,
            self.rating_token_used,
        ) {
            (false, _, _) => RatingState::NoToken,
            (true, _, true) => RatingState::Used,
            (true, true, false) => RatingState::Sent,
            (true, false, false) => RatingState::PendingSend,
        }
    }
}

/// Token and send-date schedule computed at order creation time.
///
/// - Rating feature off: no token, no send date (terminal `NoToken`).
/// - Rating on, auto-email off: token only; the link is never proactively
///   emailed but still works if the customer obtains it.
/// - Both on: send date is `today + 3` or `today + 1` days depending on
///   the delay flag.
pub fn rating_schedule(
    flags: &FeatureFlags,
    today: NaiveDate,
) -> (Option<RatingToken>, Option<NaiveDate>) {
    if !flags.rating_system_enabled {
        return (None, None);
    }

    let token = RatingToken::generate();

    if !flags.rating_auto_email_enabled {
        return (Some(token), None);
    }

    let delay_days = if flags.rating_email_three_day_delay {
        3
    } else {
        1
    };
    (Some(token), Some(today + Duration::days(delay_days)))
}

/// Request payload for checkout.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateOrderRequest {
    #[validate(email(message = "Invalid email address"))]
    pub user_email: String,

    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub user_name: String,

    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    pub items: Vec<OrderItemInput>,
}

/// One line item in a checkout request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct OrderItemInput {
    pub product_id: i64,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Response payload after checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub total_cents: i64,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            total_cents: order.total_cents,
            payment_status: order.payment_status.clone(),
            created_at: order.created_at,
        }
    }
}
