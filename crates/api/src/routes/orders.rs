//! Order endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use persistence::repositories::{NewOrderItem, OrderCreateError, OrderRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_order_created;
use crate::services::FeatureGate;
use domain::models::{rating_schedule, CreateOrderRequest, Order, OrderItem, OrderResponse};

/// Guest checkout.
///
/// POST /api/v1/orders
///
/// The rating token and email schedule are fixed at creation time from the
/// flags in effect right now; later flag changes do not retouch existing
/// orders.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let flags = FeatureGate::new(state.pool.clone()).flags().await;
    if !flags.guest_checkout_enabled {
        return Err(ApiError::Forbidden(
            "Guest checkout is currently disabled".to_string(),
        ));
    }

    request.validate()?;
    for item in &request.items {
        item.validate()?;
    }

    let (rating_token, send_rating_email_date) =
        rating_schedule(&flags, Utc::now().date_naive());

    let items: Vec<NewOrderItem> = request
        .items
        .iter()
        .map(|item| NewOrderItem {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let repository = OrderRepository::new(state.pool.clone());
    let entity = repository
        .create(
            &request.user_email,
            &request.user_name,
            &items,
            rating_token,
            send_rating_email_date,
        )
        .await
        .map_err(|e| match e {
            OrderCreateError::UnknownProduct(id) => {
                ApiError::NotFound(format!("Product {} not found", id))
            }
            OrderCreateError::Db(e) => e.into(),
        })?;

    let order = Order::from(entity);
    record_order_created();
    info!(
        order_id = %order.id,
        total_cents = order.total_cents,
        rating_scheduled = order.send_rating_email_date.is_some(),
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// Admin order lookup.
///
/// GET /api/v1/admin/orders/{id}
pub async fn admin_get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdminOrderResponse>, ApiError> {
    let repository = OrderRepository::new(state.pool.clone());

    let entity = repository
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;
    let items = repository
        .items(id)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    let order = Order::from(entity);
    Ok(Json(AdminOrderResponse { order, items }))
}

/// Admin view of an order with its line items. The order's serialization
/// already omits the rating token.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
