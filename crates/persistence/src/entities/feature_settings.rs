//! Feature settings entity (database row mapping).

use sqlx::FromRow;

use domain::models::FeatureFlags;

/// Database row mapping for the single feature_settings row (id = 1).
#[derive(Debug, Clone, FromRow)]
pub struct FeatureSettingsEntity {
    pub id: i32,
    pub rating_system_enabled: bool,
    pub rating_auto_email_enabled: bool,
    pub rating_email_three_day_delay: bool,
    pub guest_checkout_enabled: bool,
    pub site_locked: bool,
}

impl From<FeatureSettingsEntity> for FeatureFlags {
    fn from(entity: FeatureSettingsEntity) -> Self {
        Self {
            rating_system_enabled: entity.rating_system_enabled,
            rating_auto_email_enabled: entity.rating_auto_email_enabled,
            rating_email_three_day_delay: entity.rating_email_three_day_delay,
            guest_checkout_enabled: entity.guest_checkout_enabled,
            site_locked: entity.site_locked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_settings_entity_conversion() {
        let entity = FeatureSettingsEntity {
            id: 1,
            rating_system_enabled: true,
            rating_auto_email_enabled: false,
            rating_email_three_day_delay: true,
            guest_checkout_enabled: true,
            site_locked: false,
        };
        let flags: FeatureFlags = entity.into();
        assert!(flags.rating_system_enabled);
        assert!(!flags.rating_auto_email_enabled);
        assert!(flags.rating_email_three_day_delay);
    }
}
