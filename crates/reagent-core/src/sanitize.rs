//! Normalization of raw user input before it reaches the resolver.
//!
//! Text fields are parsed the way a lenient form would: leading whitespace is
//! skipped and the leading integer (or decimal) prefix is taken. Anything
//! unparseable falls back to a default and negatives clamp to zero.

use crate::silver::{Silver, f64_to_silver};

/// Parse a target quantity. Unparseable input means one unit; negative
/// input means none.
pub fn parse_target_quantity(raw: &str) -> u64 {
    match parse_int_prefix(raw) {
        Some(v) => clamp_quantity(v),
        None => 1,
    }
}

/// Parse an owned quantity. Unparseable or negative input means zero.
pub fn parse_owned_quantity(raw: &str) -> u64 {
    parse_int_prefix(raw).map(clamp_quantity).unwrap_or(0)
}

/// Parse a unit price. Unparseable, NaN or negative input means zero.
pub fn parse_price(raw: &str) -> Silver {
    raw.trim()
        .parse::<f64>()
        .map(sanitize_price)
        .unwrap_or(Silver::ZERO)
}

pub fn clamp_quantity(v: i64) -> u64 {
    u64::try_from(v).unwrap_or(0)
}

pub fn sanitize_price(v: f64) -> Silver {
    f64_to_silver(v)
}

/// Leading optionally-signed integer of `raw`, ignoring trailing garbage.
/// Saturates at the `i64` range.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}
