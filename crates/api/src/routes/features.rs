//! Feature flag endpoint handlers.

use axum::{extract::State, Json};
use persistence::repositories::FeatureSettingsRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::{FeatureFlags, UpdateFeatureFlagsRequest};

/// Read the stored flags, seeding the row with defaults on first read.
///
/// GET /api/v1/admin/features
pub async fn get_features(State(state): State<AppState>) -> Result<Json<FeatureFlags>, ApiError> {
    let repository = FeatureSettingsRepository::new(state.pool.clone());
    let entity = repository.get_or_seed().await?;
    Ok(Json(entity.into()))
}

/// Replace all flags. Last writer wins.
///
/// PUT /api/v1/admin/features
pub async fn update_features(
    State(state): State<AppState>,
    Json(request): Json<UpdateFeatureFlagsRequest>,
) -> Result<Json<FeatureFlags>, ApiError> {
    let flags = FeatureFlags::from(request);

    let repository = FeatureSettingsRepository::new(state.pool.clone());
    let entity = repository.upsert(flags).await?;
    let stored: FeatureFlags = entity.into();

    info!(
        rating_system_enabled = stored.rating_system_enabled,
        rating_auto_email_enabled = stored.rating_auto_email_enabled,
        rating_email_three_day_delay = stored.rating_email_three_day_delay,
        guest_checkout_enabled = stored.guest_checkout_enabled,
        site_locked = stored.site_locked,
        "Feature flags updated"
    );

    Ok(Json(stored))
}
