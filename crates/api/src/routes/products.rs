//! Product endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::ProductRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{default_language, sanitize_translations};
use crate::services::{resolve_locale, LocaleQuery};
use domain::models::{AdminProductView, CreateProductRequest, ProductView, UpdateProductRequest};

/// List active products with content merged for the requested language.
///
/// GET /api/v1/products?lang=nl
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = ProductRepository::new(state.pool.clone());

    let products = repository.list(true).await?;
    let views = products
        .iter()
        .map(|p| ProductView::resolve(p, &locale.requested, &locale.default))
        .collect();

    Ok(Json(views))
}

/// Fetch one active product.
///
/// GET /api/v1/products/{id}?lang=nl
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<ProductView>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = ProductRepository::new(state.pool.clone());

    let product = repository
        .find(id)
        .await?
        .filter(|p| p.active)
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductView::resolve(
        &product,
        &locale.requested,
        &locale.default,
    )))
}

/// List all products with the per-language translation sidecar.
///
/// GET /api/v1/admin/products?lang=nl
pub async fn admin_list_products(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<AdminProductView>>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = ProductRepository::new(state.pool.clone());

    let products = repository.list(false).await?;
    let views = products
        .into_iter()
        .map(|p| AdminProductView::resolve(p, &locale.requested, &locale.default))
        .collect();

    Ok(Json(views))
}

/// Fetch one product with its translation sidecar.
///
/// GET /api/v1/admin/products/{id}?lang=nl
pub async fn admin_get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<AdminProductView>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = ProductRepository::new(state.pool.clone());

    let product = repository
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(AdminProductView::resolve(
        product,
        &locale.requested,
        &locale.default,
    )))
}

/// Create a product.
///
/// POST /api/v1/admin/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<AdminProductView>), ApiError> {
    request.validate()?;

    let default = default_language(&state.pool).await?;
    let translations = sanitize_translations(request.translations, &default, true)?;

    let repository = ProductRepository::new(state.pool.clone());
    let product = repository
        .create(
            request.price_cents,
            request.image_url.as_deref(),
            request.active,
            &translations,
        )
        .await?;

    info!(product_id = product.id, "Product created");

    let view = AdminProductView::resolve(product, &default, &default);
    Ok((StatusCode::CREATED, Json(view)))
}

/// Update a product, upserting the submitted translations.
///
/// PUT /api/v1/admin/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<AdminProductView>, ApiError> {
    request.validate()?;

    let default = default_language(&state.pool).await?;
    let translations = sanitize_translations(request.translations, &default, false)?;

    let repository = ProductRepository::new(state.pool.clone());
    let product = repository
        .update(
            id,
            request.price_cents,
            request.image_url.as_deref(),
            request.active,
            &translations,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(AdminProductView::resolve(product, &default, &default)))
}

/// Delete a product and its translations.
///
/// DELETE /api/v1/admin/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = ProductRepository::new(state.pool.clone());
    if repository.delete(id).await? {
        info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Product not found".to_string()))
    }
}
