//! Integration tests for admin authentication, feature flags, and
//! language management.
//!
//! Feature flags and the default language are process-wide state, so each
//! test that mutates them restores the previous state before finishing.
//! These tests require a running PostgreSQL instance; they are skipped
//! when TEST_DATABASE_URL is not set.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{
    create_test_app, get_request, get_request_admin, json_request, json_request_admin,
    parse_response_body, run_migrations, seed_order_with_token, seed_product, test_config,
    try_test_pool,
};

fn flags_payload(guest_checkout_enabled: bool, site_locked: bool) -> serde_json::Value {
    json!({
        "rating_system_enabled": true,
        "rating_auto_email_enabled": true,
        "rating_email_three_day_delay": true,
        "guest_checkout_enabled": guest_checkout_enabled,
        "site_locked": site_locked
    })
}

#[tokio::test]
async fn test_admin_routes_require_the_admin_key() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;

    // No key
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request("/api/v1/admin/features"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong key
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method(Method::GET)
                .uri("/api/v1/admin/features")
                .header("X-Admin-Key", "not-the-key")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Right key
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request_admin("/api/v1/admin/features"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_feature_flags_gate_checkout_and_lock_the_site() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;

    let product_id = seed_product(&pool, "Bamboo pen", 350).await;
    let order_payload = json!({
        "user_email": "buyer@example.com",
        "user_name": "Buyer",
        "items": [{ "product_id": product_id, "quantity": 2 }]
    });

    // First read seeds the defaults
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request_admin("/api/v1/admin/features"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["guest_checkout_enabled"], true);
    assert_eq!(body["site_locked"], false);

    // Disable guest checkout: order creation is refused
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::PUT,
            "/api/v1/admin/features",
            flags_payload(false, false),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/orders",
            order_payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Lock the site: the whole storefront answers 503, the admin surface
    // stays reachable so the lock can be lifted
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::PUT,
            "/api/v1/admin/features",
            flags_payload(false, true),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = create_test_app(test_config(), pool.clone());
    let response = app.oneshot(get_request("/api/v1/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"]["code"], "site_locked");

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request_admin("/api/v1/admin/features"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = create_test_app(test_config(), pool.clone());
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Restore defaults and verify checkout works again
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::PUT,
            "/api/v1/admin/features",
            flags_payload(true, false),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(Method::POST, "/api/v1/orders", order_payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["total_cents"], 700);
    // The rating token must never leave the server
    assert!(body.get("rating_token").is_none());
}

#[tokio::test]
async fn test_language_management_and_default_switch() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;

    // Register German if an earlier run has not already
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/languages",
            json!({ "code": "de", "name": "German", "is_active": true }),
        ))
        .await
        .unwrap();
    assert!(
        response.status() == StatusCode::CREATED || response.status() == StatusCode::CONFLICT,
        "unexpected status {}",
        response.status()
    );

    // Rename it
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::PUT,
            "/api/v1/admin/languages/de",
            json!({ "name": "Deutsch" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Deutsch");
    assert_eq!(body["is_default"], false);

    // Promote it to default, then verify exactly one default exists
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::PUT,
            "/api/v1/admin/languages/de/default",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["is_default"], true);

    let defaults: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages WHERE is_default")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(defaults, 1);

    // Restore English as the default for the other tests
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::PUT,
            "/api/v1/admin/languages/en/default",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown language cannot be promoted
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::PUT,
            "/api/v1/admin/languages/zz/default",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_order_lookup() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;

    // Seed through the repository so this test does not depend on the
    // checkout flag, which another test in this binary toggles.
    let product_id = seed_product(&pool, "Bamboo notebook", 1250).await;
    let (order_id, _token) =
        seed_order_with_token(&pool, "lookup@example.com", "Lou", product_id, None).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request_admin(&format!(
            "/api/v1/admin/orders/{}",
            order_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["user_email"], "lookup@example.com");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    // The token never appears on the admin surface either
    assert!(body.get("rating_token").is_none());

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request_admin(&format!(
            "/api/v1/admin/orders/{}",
            uuid::Uuid::new_v4()
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
