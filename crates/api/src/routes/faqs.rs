//! FAQ endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::FaqRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{default_language, sanitize_translations};
use crate::services::{resolve_locale, LocaleQuery};
use domain::models::{AdminFaqView, CreateFaqRequest, FaqView, UpdateFaqRequest};

/// List active FAQ entries with content merged for the requested language.
///
/// GET /api/v1/faqs?lang=nl
pub async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<FaqView>>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = FaqRepository::new(state.pool.clone());

    let faqs = repository.list(true).await?;
    let views = faqs
        .iter()
        .map(|f| FaqView::resolve(f, &locale.requested, &locale.default))
        .collect();

    Ok(Json(views))
}

/// Fetch one active FAQ entry.
///
/// GET /api/v1/faqs/{id}?lang=nl
pub async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<FaqView>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = FaqRepository::new(state.pool.clone());

    let faq = repository
        .find(id)
        .await?
        .filter(|f| f.active)
        .ok_or_else(|| ApiError::NotFound("FAQ entry not found".to_string()))?;

    Ok(Json(FaqView::resolve(
        &faq,
        &locale.requested,
        &locale.default,
    )))
}

/// List all FAQ entries with the translation sidecar.
///
/// GET /api/v1/admin/faqs?lang=nl
pub async fn admin_list_faqs(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<AdminFaqView>>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = FaqRepository::new(state.pool.clone());

    let faqs = repository.list(false).await?;
    let views = faqs
        .into_iter()
        .map(|f| AdminFaqView::resolve(f, &locale.requested, &locale.default))
        .collect();

    Ok(Json(views))
}

/// Fetch one FAQ entry with its translation sidecar.
///
/// GET /api/v1/admin/faqs/{id}?lang=nl
pub async fn admin_get_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<AdminFaqView>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = FaqRepository::new(state.pool.clone());

    let faq = repository
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("FAQ entry not found".to_string()))?;

    Ok(Json(AdminFaqView::resolve(
        faq,
        &locale.requested,
        &locale.default,
    )))
}

/// Create an FAQ entry.
///
/// POST /api/v1/admin/faqs
pub async fn create_faq(
    State(state): State<AppState>,
    Json(request): Json<CreateFaqRequest>,
) -> Result<(StatusCode, Json<AdminFaqView>), ApiError> {
    request.validate()?;

    let default = default_language(&state.pool).await?;
    let translations = sanitize_translations(request.translations, &default, true)?;

    let repository = FaqRepository::new(state.pool.clone());
    let faq = repository
        .create(request.sort_order, request.active, &translations)
        .await?;

    info!(faq_id = faq.id, "FAQ entry created");

    let view = AdminFaqView::resolve(faq, &default, &default);
    Ok((StatusCode::CREATED, Json(view)))
}

/// Update an FAQ entry, upserting the submitted translations.
///
/// PUT /api/v1/admin/faqs/{id}
pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateFaqRequest>,
) -> Result<Json<AdminFaqView>, ApiError> {
    request.validate()?;

    let default = default_language(&state.pool).await?;
    let translations = sanitize_translations(request.translations, &default, false)?;

    let repository = FaqRepository::new(state.pool.clone());
    let faq = repository
        .update(id, request.sort_order, request.active, &translations)
        .await?
        .ok_or_else(|| ApiError::NotFound("FAQ entry not found".to_string()))?;

    Ok(Json(AdminFaqView::resolve(faq, &default, &default)))
}

/// Delete an FAQ entry and its translations.
///
/// DELETE /api/v1/admin/faqs/{id}
pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = FaqRepository::new(state.pool.clone());
    if repository.delete(id).await? {
        info!(faq_id = id, "FAQ entry deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("FAQ entry not found".to_string()))
    }
}
