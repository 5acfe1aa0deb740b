//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod blog;
pub mod faq;
pub mod feature_settings;
pub mod language;
pub mod order;
pub mod order_rating;
pub mod product;

pub use blog::{BlogRowEntity, BlogTranslationEntity};
pub use faq::{FaqRowEntity, FaqTranslationEntity};
pub use feature_settings::FeatureSettingsEntity;
pub use language::LanguageEntity;
pub use order::{OrderEntity, OrderItemEntity};
pub use order_rating::OrderRatingEntity;
pub use product::{ProductRowEntity, ProductTranslationEntity};
