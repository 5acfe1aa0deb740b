//! Domain layer for the Bamboo Commerce backend.
//!
//! This crate contains:
//! - Domain models (translated catalog entities, orders, ratings)
//! - Pure business logic (translation fallback, rating email scheduling)
//! - Request/response types with validation

pub mod models;
