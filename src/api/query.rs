//! Lenient query-string parsing.
//!
//! Malformed numbers fall back to the route default, negative values clamp
//! to zero, and limits are capped. Nothing here rejects a request.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Timeframe;

/// Largest page any list endpoint will return.
pub const MAX_LIMIT: usize = 1_000;

/// Raw `limit` / `offset` / `timeframe` values, kept as strings so a bad
/// value never fails extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub timeframe: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MirrorParams {
    pub amount: Option<String>,
    pub slippage: Option<String>,
}

pub fn parse_count(raw: Option<&str>, default: usize) -> usize {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) if n < 0 => 0,
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        None => default,
    }
}

pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    parse_count(raw, default).min(MAX_LIMIT)
}

pub fn parse_timeframe(raw: Option<&str>) -> Timeframe {
    raw.and_then(Timeframe::from_query).unwrap_or_default()
}

/// Decimal within `[min, max]`; anything unparseable becomes `default`.
pub fn parse_decimal(raw: Option<&str>, default: Decimal, min: Decimal, max: Decimal) -> Decimal {
    raw.and_then(|s| s.trim().parse::<Decimal>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

impl ListParams {
    pub fn limit(&self, default: usize) -> usize {
        parse_limit(self.limit.as_deref(), default)
    }

    pub fn offset(&self) -> usize {
        parse_count(self.offset.as_deref(), 0)
    }

    pub fn timeframe(&self) -> Timeframe {
        parse_timeframe(self.timeframe.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_uses_default() {
        assert_eq!(parse_limit(None, 20), 20);
    }

    #[test]
    fn test_garbage_uses_default() {
        assert_eq!(parse_limit(Some("abc"), 20), 20);
        assert_eq!(parse_limit(Some(""), 50), 50);
        assert_eq!(parse_limit(Some("1.5"), 10), 10);
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(parse_limit(Some("-5"), 20), 0);
        assert_eq!(parse_count(Some("-1"), 0), 0);
    }

    #[test]
    fn test_limit_capped() {
        assert_eq!(parse_limit(Some("1000000"), 20), MAX_LIMIT);
        assert_eq!(parse_count(Some("1000000"), 0), 1_000_000);
    }

    #[test]
    fn test_timeframe() {
        assert_eq!(parse_timeframe(None), Timeframe::Day);
        assert_eq!(parse_timeframe(Some("7d")), Timeframe::Week);
        assert_eq!(parse_timeframe(Some("forever")), Timeframe::Day);
    }

    #[test]
    fn test_decimal_clamped() {
        let (min, max) = (Decimal::new(1, 1), Decimal::from(5));
        let default = Decimal::new(5, 1);
        assert_eq!(parse_decimal(Some("2.5"), default, min, max), Decimal::new(25, 1));
        assert_eq!(parse_decimal(Some("50"), default, min, max), max);
        assert_eq!(parse_decimal(Some("x"), default, min, max), default);
    }
}
