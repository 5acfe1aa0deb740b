//! Feature settings repository.
//!
//! The settings live in a single row with id fixed to 1. Readers that find
//! no row (or cannot reach the database) fall back to
//! `FeatureFlags::default()`; that fallback lives in the gate service on
//! the API side, this repository only reports what is stored.

use sqlx::PgPool;

use crate::entities::FeatureSettingsEntity;
use crate::metrics::QueryTimer;
use domain::models::FeatureFlags;

/// Fixed primary key of the singleton settings row.
const SETTINGS_ROW_ID: i32 = 1;

/// Repository for the feature_settings singleton row.
#[derive(Clone)]
pub struct FeatureSettingsRepository {
    pool: PgPool,
}

impl FeatureSettingsRepository {
    /// Creates a new FeatureSettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the stored flags, if the row exists.
    pub async fn get(&self) -> Result<Option<FeatureSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_feature_settings");
        let result = sqlx::query_as::<_, FeatureSettingsEntity>(
            r#"
            SELECT id, rating_system_enabled, rating_auto_email_enabled,
                   rating_email_three_day_delay, guest_checkout_enabled, site_locked
            FROM feature_settings
            WHERE id = $1
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get the stored flags, lazily seeding the row with defaults when it
    /// does not exist yet.
    pub async fn get_or_seed(&self) -> Result<FeatureSettingsEntity, sqlx::Error> {
        if let Some(entity) = self.get().await? {
            return Ok(entity);
        }
        self.upsert(FeatureFlags::default()).await
    }

    /// Wholesale update of all flags (admin action, last-writer-wins).
    pub async fn upsert(&self, flags: FeatureFlags) -> Result<FeatureSettingsEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_feature_settings");
        let result = sqlx::query_as::<_, FeatureSettingsEntity>(
            r#"
            INSERT INTO feature_settings
                (id, rating_system_enabled, rating_auto_email_enabled,
                 rating_email_three_day_delay, guest_checkout_enabled, site_locked)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id)
            DO UPDATE SET rating_system_enabled = $2,
                          rating_auto_email_enabled = $3,
                          rating_email_three_day_delay = $4,
                          guest_checkout_enabled = $5,
                          site_locked = $6,
                          updated_at = NOW()
            RETURNING id, rating_system_enabled, rating_auto_email_enabled,
                      rating_email_three_day_delay, guest_checkout_enabled, site_locked
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(flags.rating_system_enabled)
        .bind(flags.rating_auto_email_enabled)
        .bind(flags.rating_email_three_day_delay)
        .bind(flags.guest_checkout_enabled)
        .bind(flags.site_locked)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
