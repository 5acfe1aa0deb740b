//! Site lock middleware.
//!
//! When the `site_locked` flag is set the storefront is closed for
//! maintenance and every public route answers 503. Admin and health
//! routes bypass this middleware so operators can unlock the site.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::AppState;
use crate::services::FeatureGate;

/// Middleware that rejects storefront traffic while the site is locked.
pub async fn site_lock(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let gate = FeatureGate::new(state.pool.clone());
    let flags = gate.flags().await;

    if flags.site_locked {
        return locked_response();
    }

    next.run(req).await
}

fn locked_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "error": {
                "code": "site_locked",
                "message": "The store is temporarily closed for maintenance"
            }
        })),
    )
        .into_response()
}
