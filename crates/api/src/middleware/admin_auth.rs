//! Admin authentication middleware.
//!
//! Provides middleware for requiring the admin key on back-office routes.

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

/// Middleware that requires the admin key.
///
/// Validates the `X-Admin-Key` header against the configured key and
/// rejects requests without a match. The comparison goes through a digest
/// so the key length is not observable through timing.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get("X-Admin-Key")
        .and_then(|v| v.to_str().ok());

    let presented = match presented {
        Some(key) => key,
        None => {
            return unauthorized_response("Invalid or missing admin key");
        }
    };

    if !shared::crypto::verify_key(presented, &state.config.security.admin_api_key) {
        return unauthorized_response("Invalid or missing admin key");
    }

    next.run(req).await
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_response_status() {
        let response = unauthorized_response("nope");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
