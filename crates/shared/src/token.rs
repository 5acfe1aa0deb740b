//! Capability token for post-purchase rating submissions.
//!
//! A `RatingToken` is a bearer capability: possession of the token is the
//! only authorization required to rate an order. It is deliberately a
//! distinct type from any user or session identifier so it cannot be
//! conflated with authenticated identity elsewhere in the codebase.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One-time bearer token attached to an order at creation time.
///
/// Generated from a v4 UUID (128 bits of randomness). The `Debug`
/// implementation is redacted so the token never leaks into logs; the only
/// place the full value is rendered is the rating email link.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingToken(Uuid);

impl RatingToken {
    /// Generate a fresh, unguessable token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID, for binding into database queries.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Render the token for embedding in the one-time email link.
    ///
    /// Named explicitly (rather than relying on `Display`) so call sites
    /// that expose the token are easy to audit.
    pub fn expose(&self) -> String {
        self.0.to_string()
    }
}

impl From<Uuid> for RatingToken {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for RatingToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

impl fmt::Debug for RatingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RatingToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = RatingToken::generate();
        let b = RatingToken::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = RatingToken::generate();
        let debug = format!("{:?}", token);
        assert_eq!(debug, "RatingToken(..)");
        assert!(!debug.contains(&token.expose()));
    }

    #[test]
    fn test_expose_round_trips() {
        let token = RatingToken::generate();
        let parsed: RatingToken = token.expose().parse().expect("valid token string");
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("not-a-token".parse::<RatingToken>().is_err());
        assert!("".parse::<RatingToken>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let token = RatingToken::generate();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, format!("\"{}\"", token.expose()));

        let back: RatingToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
