//! Domain model definitions.

pub mod blog;
pub mod faq;
pub mod feature_settings;
pub mod language;
pub mod order;
pub mod order_rating;
pub mod product;
pub mod translation;

pub use blog::{AdminBlogView, Blog, BlogContent, BlogView, CreateBlogRequest, UpdateBlogRequest};
pub use faq::{AdminFaqView, CreateFaqRequest, Faq, FaqContent, FaqView, UpdateFaqRequest};
pub use feature_settings::{FeatureFlags, UpdateFeatureFlagsRequest};
pub use language::{
    is_valid_language_code, CreateLanguageRequest, Language, UpdateLanguageRequest,
    FALLBACK_LANGUAGE,
};
pub use order::{
    rating_schedule, CreateOrderRequest, Order, OrderItem, OrderItemInput, OrderResponse,
    RatingState,
};
pub use order_rating::{OrderRating, ProductRatingInput, RatingOrderView, SubmitRatingRequest};
pub use product::{
    AdminProductView, CreateProductRequest, Product, ProductContent, ProductView,
    UpdateProductRequest,
};
pub use translation::{LocalizedFields, TranslationSet};
