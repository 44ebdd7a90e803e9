//! `Cache-Control` and `Vary` interpretation
//!
//! The TTL rules, in order:
//! - no `Cache-Control` header: the configured default TTL
//! - `no-cache` or `private` anywhere in the value: zero, not cacheable
//! - `max-age=N`: `max(1, N)` seconds
//! - anything else: the configured default TTL

use std::num::IntErrorKind;
use std::time::Duration;

use http::HeaderMap;

use crate::http::joined_value;

/// Derive the TTL for a response from its headers.
#[must_use]
pub fn ttl_from_cache_control(headers: &HeaderMap, default_ttl: Duration) -> Duration {
    let Some(cache_control) = joined_value(headers, "cache-control") else {
        return default_ttl;
    };
    let cache_control = cache_control.to_ascii_lowercase();

    if cache_control.contains("no-cache") || cache_control.contains("private") {
        return Duration::ZERO;
    }

    match parse_max_age(&cache_control) {
        Some(seconds) => Duration::from_secs(u64::try_from(seconds.max(1)).unwrap_or(1)),
        None => default_ttl,
    }
}

/// Parse the first well-formed `max-age` directive; `s-maxage` does not count.
fn parse_max_age(cache_control: &str) -> Option<i64> {
    cache_control.split(',').find_map(|directive| {
        let (name, value) = directive.split_once('=')?;
        if name.trim() != "max-age" {
            return None;
        }
        let value = value.trim().trim_matches('"');
        match value.parse::<i64>() {
            Ok(seconds) => Some(seconds),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(i64::MAX),
            Err(_) => None,
        }
    })
}

/// Header names listed by `Vary`, lower-cased and in order.
///
/// `None` when the response carries no `Vary` header, meaning the response
/// matches every request for its URL.
#[must_use]
pub fn parse_vary(headers: &HeaderMap) -> Option<Vec<String>> {
    let vary = joined_value(headers, "vary")?;
    Some(
        vary.split(',')
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect(),
    )
}
