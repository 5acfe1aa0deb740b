//! Order rating endpoint handlers.
//!
//! These endpoints are authorized by token possession alone; there is no
//! user identity on the rating page. Lookup failures and malformed tokens
//! are indistinguishable (both 404) so the endpoint cannot be used to
//! probe which tokens exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{
    OrderRatingRepository, OrderRepository, RatingSubmission, SubmissionOutcome,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_rating_submitted;
use shared::token::RatingToken;

use domain::models::{OrderItem, OrderRating, RatingOrderView, SubmitRatingRequest};

/// Look up the order behind a rating token, for the rating page.
///
/// GET /api/v1/ratings/order/{token}
pub async fn get_order_for_rating(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<RatingOrderView>, ApiError> {
    let token: RatingToken = token
        .parse()
        .map_err(|_| ApiError::NotFound("Order not found".to_string()))?;

    let repository = OrderRepository::new(state.pool.clone());
    let entity = repository
        .find_by_rating_token(token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    if entity.rating_token_used {
        return Err(ApiError::AlreadyRated);
    }

    let items: Vec<OrderItem> = repository
        .items(entity.id)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(Json(RatingOrderView {
        order_id: entity.id,
        user_name: entity.user_name,
        total_cents: entity.total_cents,
        ordered_on: entity.created_at.date_naive(),
        items,
    }))
}

/// Submit a rating, consuming the token.
///
/// POST /api/v1/ratings
pub async fn submit_rating(
    State(state): State<AppState>,
    Json(request): Json<SubmitRatingRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;
    for product_rating in &request.product_ratings {
        product_rating.validate()?;
    }

    let submission = RatingSubmission {
        order_id: request.order_id,
        rating_token: request.rating_token,
        overall_rating: request.overall_rating,
        overall_comment: request.overall_comment,
        product_ratings: request.product_ratings,
    };

    let repository = OrderRatingRepository::new(state.pool.clone());
    match repository.submit(&submission).await? {
        SubmissionOutcome::Created => {
            record_rating_submitted();
            info!(order_id = %submission.order_id, "Rating submitted");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "status": "created", "order_id": submission.order_id })),
            ))
        }
        SubmissionOutcome::NotFound => Err(ApiError::NotFound("Order not found".to_string())),
        SubmissionOutcome::AlreadyRated => Err(ApiError::AlreadyRated),
    }
}

/// List an order's stored ratings.
///
/// GET /api/v1/admin/orders/{id}/ratings
pub async fn admin_list_order_ratings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OrderRating>>, ApiError> {
    let orders = OrderRepository::new(state.pool.clone());
    if orders.find(id).await?.is_none() {
        return Err(ApiError::NotFound("Order not found".to_string()));
    }

    let repository = OrderRatingRepository::new(state.pool.clone());
    let ratings = repository
        .list_for_order(id)
        .await?
        .into_iter()
        .map(OrderRating::from)
        .collect();

    Ok(Json(ratings))
}
