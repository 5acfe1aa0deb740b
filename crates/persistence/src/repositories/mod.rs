//! Repository implementations.

pub mod blog;
pub mod faq;
pub mod feature_settings;
pub mod language;
pub mod order;
pub mod order_rating;
pub mod product;

pub use blog::BlogRepository;
pub use faq::FaqRepository;
pub use feature_settings::FeatureSettingsRepository;
pub use language::LanguageRepository;
pub use order::{NewOrderItem, OrderCreateError, OrderRepository};
pub use order_rating::{OrderRatingRepository, RatingSubmission, SubmissionOutcome};
pub use product::ProductRepository;
