//! Application services.

pub mod email;
pub mod feature_gate;
pub mod locale;

pub use email::{EmailService, RatingEmailSender};
pub use feature_gate::FeatureGate;
pub use locale::{resolve_locale, Locale, LocaleQuery};
