//! Feature flag domain model.
//!
//! A single settings record gates optional behavior across the platform.
//! When the record is absent or unreadable the gate falls back to the
//! compiled-in defaults below. The polarity of each default is deliberate:
//! commerce features default to enabled so an infrastructure hiccup cannot
//! silently disable the shop, while `site_locked` defaults to unlocked for
//! the same reason.

use serde::{Deserialize, Serialize};

/// Named boolean switches, stored as the single `feature_settings` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeatureFlags {
    /// Orders receive a rating token at creation time.
    pub rating_system_enabled: bool,
    /// The daily sweep emails customers a rating link.
    pub rating_auto_email_enabled: bool,
    /// Rating email is scheduled 3 days after the order instead of 1.
    pub rating_email_three_day_delay: bool,
    /// Checkout is allowed without a customer account.
    pub guest_checkout_enabled: bool,
    /// Storefront routes return 503 (admin and health stay reachable).
    pub site_locked: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            rating_system_enabled: true,
            rating_auto_email_enabled: true,
            rating_email_three_day_delay: true,
            guest_checkout_enabled: true,
            // Opposite polarity: a missing row must not lock the site out.
            site_locked: false,
        }
    }
}

/// Request payload for the wholesale admin update of all flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateFeatureFlagsRequest {
    pub rating_system_enabled: bool,
    pub rating_auto_email_enabled: bool,
    pub rating_email_three_day_delay: bool,
    pub guest_checkout_enabled: bool,
    pub site_locked: bool,
}

impl From<UpdateFeatureFlagsRequest> for FeatureFlags {
    fn from(request: UpdateFeatureFlagsRequest) -> Self {
        Self {
            rating_system_enabled: request.rating_system_enabled,
            rating_auto_email_enabled: request.rating_auto_email_enabled,
            rating_email_three_day_delay: request.rating_email_three_day_delay,
            guest_checkout_enabled: request.guest_checkout_enabled,
            site_locked: request.site_locked,
        }
    }
}
