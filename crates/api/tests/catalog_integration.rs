//! Integration tests for the multilingual catalog.
//!
//! These tests require a running PostgreSQL instance; they are skipped
//! when TEST_DATABASE_URL is not set.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{
    create_test_app, ensure_language, get_request, get_request_admin, json_request_admin,
    parse_response_body, run_migrations, test_config, try_test_pool,
};

#[tokio::test]
async fn test_storefront_falls_back_per_field() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    ensure_language(&pool, "nl", "Nederlands").await;

    // Create a product with a full English entry and a Dutch entry that
    // has a name but no description
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/products",
            json!({
                "price_cents": 2495,
                "translations": {
                    "en": { "name": "Bamboo cutting board", "description": "End-grain, 40x30cm" },
                    "nl": { "name": "Bamboe snijplank", "description": "" }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    let product_id = body["id"].as_i64().unwrap();

    // Dutch request: name from nl, description filled from English
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/products/{}?lang=nl",
            product_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Bamboe snijplank");
    assert_eq!(body["description"], "End-grain, 40x30cm");

    // An unknown language quietly resolves to the default
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request(&format!(
            "/api/v1/products/{}?lang=xx",
            product_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Bamboo cutting board");
}

#[tokio::test]
async fn test_update_upserts_translations_without_duplicating() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    ensure_language(&pool, "nl", "Nederlands").await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/products",
            json!({
                "price_cents": 1895,
                "translations": {
                    "en": { "name": "Bamboo lunchbox", "description": "Two tiers" }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    let product_id = body["id"].as_i64().unwrap();

    // Submit a Dutch translation twice; the second write must replace the
    // first, not accumulate
    for name in ["Bamboe broodtrommel", "Bamboe lunchbox"] {
        let app = create_test_app(test_config(), pool.clone());
        let response = app
            .oneshot(json_request_admin(
                Method::PUT,
                &format!("/api/v1/admin/products/{}", product_id),
                json!({
                    "translations": {
                        "nl": { "name": name, "description": "Twee lagen" }
                    }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request_admin(&format!(
            "/api/v1/admin/products/{}",
            product_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["translations"]["nl"]["name"], "Bamboe lunchbox");
    assert_eq!(body["translations"]["en"]["name"], "Bamboo lunchbox");

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM product_translations WHERE product_id = $1 AND language_code = 'nl'",
    )
    .bind(product_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_translation_write_rules() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    ensure_language(&pool, "nl", "Nederlands").await;

    // Incomplete default-language entry is rejected
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/products",
            json!({
                "price_cents": 999,
                "translations": {
                    "en": { "name": "", "description": "no name" }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing default-language entry is rejected on create
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/products",
            json!({
                "price_cents": 999,
                "translations": {
                    "nl": { "name": "Bamboe borstel", "description": "" }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Invalid language code is rejected outright
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/products",
            json!({
                "price_cents": 999,
                "translations": {
                    "en": { "name": "Bamboo brush", "description": "" },
                    "NOT A CODE": { "name": "x", "description": "" }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Incomplete entries for non-default languages are silently dropped
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/products",
            json!({
                "price_cents": 999,
                "translations": {
                    "en": { "name": "Bamboo brush", "description": "Soft bristles" },
                    "nl": { "name": "", "description": "geen naam" }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert!(body["translations"].get("nl").is_none());
}

#[tokio::test]
async fn test_inactive_products_hidden_from_storefront() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/products",
            json!({
                "price_cents": 3200,
                "active": false,
                "translations": {
                    "en": { "name": "Bamboo bench", "description": "Not yet launched" }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    let product_id = body["id"].as_i64().unwrap();

    // Hidden from the public catalog
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request(&format!("/api/v1/products/{}", product_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Still visible to the admin
    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request_admin(&format!(
            "/api/v1/admin/products/{}",
            product_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_blog_crud_and_delete() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request_admin(
            Method::POST,
            "/api/v1/admin/blogs",
            json!({
                "translations": {
                    "en": { "title": "Why bamboo", "content": "It grows fast." }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    let blog_id = body["id"].as_i64().unwrap();

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request(&format!("/api/v1/blogs/{}", blog_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["title"], "Why bamboo");

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/v1/admin/blogs/{}", blog_id))
                .header("X-Admin-Key", common::TEST_ADMIN_KEY)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(get_request(&format!("/api/v1/blogs/{}", blog_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
