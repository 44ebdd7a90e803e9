//! Header helpers - using standard http crate types

use http::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

/// Errors produced while converting strings into header components.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("invalid header name: {0:?}")]
    InvalidName(String),
    #[error("invalid value for header {0}")]
    InvalidValue(String),
}

/// Parse a header name/value pair.
///
/// # Errors
///
/// Returns `HeaderError` if the name is not a valid token or the value
/// contains bytes that are not allowed in a header value.
pub fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), HeaderError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| HeaderError::InvalidName(name.to_string()))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|_| HeaderError::InvalidValue(name.to_string()))?;
    Ok((header_name, header_value))
}

/// All values of `name` joined with `", "`, skipping values that are not visible ASCII.
#[must_use]
pub fn joined_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// True when both maps carry exactly the same values, in the same order, for `name`.
///
/// A name that is absent from both maps compares equal.
#[must_use]
pub fn same_values(a: &HeaderMap, b: &HeaderMap, name: &str) -> bool {
    a.get_all(name).iter().eq(b.get_all(name).iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_value_merges_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("cache-control", HeaderValue::from_static("public"));
        headers.append("cache-control", HeaderValue::from_static("max-age=5"));

        assert_eq!(
            joined_value(&headers, "Cache-Control").as_deref(),
            Some("public, max-age=5")
        );
        assert_eq!(joined_value(&headers, "vary"), None);
    }

    #[test]
    fn test_same_values() {
        let mut a = HeaderMap::new();
        let mut b = HeaderMap::new();
        assert!(same_values(&a, &b, "accept-language"));

        a.insert("accept-language", HeaderValue::from_static("en"));
        assert!(!same_values(&a, &b, "accept-language"));

        b.insert("accept-language", HeaderValue::from_static("en"));
        assert!(same_values(&a, &b, "Accept-Language"));
    }

    #[test]
    fn test_parse_header_rejects_bad_input() {
        assert!(matches!(
            parse_header("bad name", "x"),
            Err(HeaderError::InvalidName(_))
        ));
        assert!(matches!(
            parse_header("x-ok", "line\nbreak"),
            Err(HeaderError::InvalidValue(_))
        ));
        assert!(parse_header("Accept-Language", "de").is_ok());
    }
}
