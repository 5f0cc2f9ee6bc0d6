//! `skip` / `limit` pagination shared by every list endpoint.
//!
//! The server clamps incoming values; the client serializes the same struct
//! as query parameters and uses it as part of the list cache key.

use serde::{Deserialize, Serialize};

/// Default page size when `limit` is omitted.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 1000;

/// Pagination parameters (`?skip=&limit=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    /// Effective `(limit, offset)` pair after clamping.
    pub fn clamped(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT),
            clamp_offset(self.skip),
        )
    }
}

/// Clamp a user-provided limit to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 100, 1000), 100);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(5000), 100, 1000), 1000);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 100, 1000), 1);
        assert_eq!(clamp_limit(Some(-3), 100, 1000), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn page_clamped_defaults() {
        assert_eq!(Page::default().clamped(), (DEFAULT_LIMIT, 0));
        assert_eq!(Page::new(20, 10).clamped(), (10, 20));
    }
}
