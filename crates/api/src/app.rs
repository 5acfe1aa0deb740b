use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    admin_auth::require_admin, metrics::metrics_handler, metrics::metrics_middleware,
    security_headers::security_headers_middleware, site_lock::site_lock, trace_id::trace_id,
};
use crate::routes::{blogs, faqs, features, health, languages, orders, products, ratings};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Storefront routes. Gated by the site lock so maintenance mode shuts
    // the whole public surface at once.
    let storefront_routes = Router::new()
        .route("/api/v1/languages", get(languages::list_languages))
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/:id", get(products::get_product))
        .route("/api/v1/blogs", get(blogs::list_blogs))
        .route("/api/v1/blogs/:id", get(blogs::get_blog))
        .route("/api/v1/faqs", get(faqs::list_faqs))
        .route("/api/v1/faqs/:id", get(faqs::get_faq))
        .route("/api/v1/orders", post(orders::create_order))
        .route(
            "/api/v1/ratings/order/:token",
            get(ratings::get_order_for_rating),
        )
        .route("/api/v1/ratings", post(ratings::submit_rating))
        .route_layer(middleware::from_fn_with_state(state.clone(), site_lock));

    // Admin routes (require the admin key; never site-locked, otherwise
    // nobody could unlock the site)
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/features",
            get(features::get_features).put(features::update_features),
        )
        .route(
            "/api/v1/admin/languages",
            get(languages::admin_list_languages).post(languages::create_language),
        )
        .route(
            "/api/v1/admin/languages/:code",
            put(languages::update_language),
        )
        .route(
            "/api/v1/admin/languages/:code/default",
            put(languages::set_default_language),
        )
        .route(
            "/api/v1/admin/products",
            get(products::admin_list_products).post(products::create_product),
        )
        .route(
            "/api/v1/admin/products/:id",
            get(products::admin_get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/api/v1/admin/blogs",
            get(blogs::admin_list_blogs).post(blogs::create_blog),
        )
        .route(
            "/api/v1/admin/blogs/:id",
            get(blogs::admin_get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        .route(
            "/api/v1/admin/faqs",
            get(faqs::admin_list_faqs).post(faqs::create_faq),
        )
        .route(
            "/api/v1/admin/faqs/:id",
            get(faqs::admin_get_faq)
                .put(faqs::update_faq)
                .delete(faqs::delete_faq),
        )
        .route("/api/v1/admin/orders/:id", get(orders::admin_get_order))
        .route(
            "/api/v1/admin/orders/:id/ratings",
            get(ratings::admin_list_order_ratings),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Public routes (no authentication, no site lock)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(storefront_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
