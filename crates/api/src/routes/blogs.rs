//! Blog endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::BlogRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{default_language, sanitize_translations};
use crate::services::{resolve_locale, LocaleQuery};
use domain::models::{AdminBlogView, BlogView, CreateBlogRequest, UpdateBlogRequest};

/// List active blog posts with content merged for the requested language.
///
/// GET /api/v1/blogs?lang=nl
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<BlogView>>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = BlogRepository::new(state.pool.clone());

    let blogs = repository.list(true).await?;
    let views = blogs
        .iter()
        .map(|b| BlogView::resolve(b, &locale.requested, &locale.default))
        .collect();

    Ok(Json(views))
}

/// Fetch one active blog post.
///
/// GET /api/v1/blogs/{id}?lang=nl
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<BlogView>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = BlogRepository::new(state.pool.clone());

    let blog = repository
        .find(id)
        .await?
        .filter(|b| b.active)
        .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))?;

    Ok(Json(BlogView::resolve(
        &blog,
        &locale.requested,
        &locale.default,
    )))
}

/// List all blog posts with the translation sidecar.
///
/// GET /api/v1/admin/blogs?lang=nl
pub async fn admin_list_blogs(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<Vec<AdminBlogView>>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = BlogRepository::new(state.pool.clone());

    let blogs = repository.list(false).await?;
    let views = blogs
        .into_iter()
        .map(|b| AdminBlogView::resolve(b, &locale.requested, &locale.default))
        .collect();

    Ok(Json(views))
}

/// Fetch one blog post with its translation sidecar.
///
/// GET /api/v1/admin/blogs/{id}?lang=nl
pub async fn admin_get_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<AdminBlogView>, ApiError> {
    let locale = resolve_locale(&state.pool, &query).await;
    let repository = BlogRepository::new(state.pool.clone());

    let blog = repository
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))?;

    Ok(Json(AdminBlogView::resolve(
        blog,
        &locale.requested,
        &locale.default,
    )))
}

/// Create a blog post.
///
/// POST /api/v1/admin/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    Json(request): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<AdminBlogView>), ApiError> {
    request.validate()?;

    let default = default_language(&state.pool).await?;
    let translations = sanitize_translations(request.translations, &default, true)?;

    let repository = BlogRepository::new(state.pool.clone());
    let blog = repository
        .create(
            request.image_url.as_deref(),
            request.published_at,
            request.active,
            &translations,
        )
        .await?;

    info!(blog_id = blog.id, "Blog post created");

    let view = AdminBlogView::resolve(blog, &default, &default);
    Ok((StatusCode::CREATED, Json(view)))
}

/// Update a blog post, upserting the submitted translations.
///
/// PUT /api/v1/admin/blogs/{id}
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBlogRequest>,
) -> Result<Json<AdminBlogView>, ApiError> {
    request.validate()?;

    let default = default_language(&state.pool).await?;
    let translations = sanitize_translations(request.translations, &default, false)?;

    let repository = BlogRepository::new(state.pool.clone());
    let blog = repository
        .update(
            id,
            request.image_url.as_deref(),
            request.published_at,
            request.active,
            &translations,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))?;

    Ok(Json(AdminBlogView::resolve(blog, &default, &default)))
}

/// Delete a blog post and its translations.
///
/// DELETE /api/v1/admin/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repository = BlogRepository::new(state.pool.clone());
    if repository.delete(id).await? {
        info!(blog_id = id, "Blog post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Blog post not found".to_string()))
    }
}
