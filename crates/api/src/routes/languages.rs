//! Language endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::LanguageRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::{CreateLanguageRequest, Language, UpdateLanguageRequest};

/// List languages selectable by the storefront.
///
/// GET /api/v1/languages
pub async fn list_languages(State(state): State<AppState>) -> Result<Json<Vec<Language>>, ApiError> {
    let repository = LanguageRepository::new(state.pool.clone());
    let languages = repository
        .list_active()
        .await?
        .into_iter()
        .map(Language::from)
        .collect();
    Ok(Json(languages))
}

/// List all languages, including inactive ones.
///
/// GET /api/v1/admin/languages
pub async fn admin_list_languages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Language>>, ApiError> {
    let repository = LanguageRepository::new(state.pool.clone());
    let languages = repository
        .list_all()
        .await?
        .into_iter()
        .map(Language::from)
        .collect();
    Ok(Json(languages))
}

/// Register a new language.
///
/// POST /api/v1/admin/languages
pub async fn create_language(
    State(state): State<AppState>,
    Json(request): Json<CreateLanguageRequest>,
) -> Result<(StatusCode, Json<Language>), ApiError> {
    request.validate()?;

    let repository = LanguageRepository::new(state.pool.clone());
    let entity = repository
        .create(&request.code, &request.name, request.is_active)
        .await?;

    let language = Language::from(entity);
    info!(code = %language.code, is_default = language.is_default, "Language registered");

    Ok((StatusCode::CREATED, Json(language)))
}

/// Update a language's name or availability.
///
/// PUT /api/v1/admin/languages/{code}
pub async fn update_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<UpdateLanguageRequest>,
) -> Result<Json<Language>, ApiError> {
    request.validate()?;

    let repository = LanguageRepository::new(state.pool.clone());
    let entity = repository
        .update(&code, request.name.as_deref(), request.is_active)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    Ok(Json(Language::from(entity)))
}

/// Make a language the store default.
///
/// PUT /api/v1/admin/languages/{code}/default
pub async fn set_default_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Language>, ApiError> {
    let repository = LanguageRepository::new(state.pool.clone());
    let entity = repository
        .set_default(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Language not found".to_string()))?;

    let language = Language::from(entity);
    info!(code = %language.code, "Default language changed");

    Ok(Json(language))
}
