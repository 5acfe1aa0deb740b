//! Shared utilities and common types for the Bamboo Commerce backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Capability token type for post-purchase rating links
//! - Cryptographic utilities (hashing, key comparison)

pub mod crypto;
pub mod token;
