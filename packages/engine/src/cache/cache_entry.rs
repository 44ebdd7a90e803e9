//! Cache entry: one stored response plus its caching metadata
//!
//! Provides `CacheEntry`, built from a response whose body is fully read into
//! memory, with the TTL derived from `Cache-Control` and the `Vary` list used
//! to decide which requests (and which other entries) it matches.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, StatusCode, Version};
use tokio::time::Instant;
use url::Url;

use super::directives::{parse_vary, ttl_from_cache_control};
use crate::error::{self, Result};
use crate::http::{HttpRequest, HttpResponse, same_values};

/// Upper bound on how far in the future an entry may expire (30 years).
/// `ttl` keeps the value from `Cache-Control`; only `expires_at` is capped.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Cached response entry with metadata
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Key the entry is stored under
    pub url: Url,
    /// Lower-cased header names from `Vary`; `None` matches unconditionally
    pub vary: Option<Vec<String>>,
    /// Values of the `Vary`-named headers on the request the response was
    /// stored for; every other request header is dropped
    pub request_headers: HeaderMap,
    /// Time to live, whole seconds
    pub ttl: Duration,
    pub stored_at: Instant,
    pub expires_at: Instant,
    /// Cached response data (materialized from streams)
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CacheEntry {
    /// Create new cache entry from an HTTP response, reading its body to the end.
    ///
    /// The key is `url` when given, otherwise the response's own URL, in both
    /// cases without its fragment.
    ///
    /// # Errors
    ///
    /// Returns a body error if the body stream fails, or a validation error if
    /// there is no URL to store the response under.
    pub async fn new(
        response: HttpResponse,
        url: Option<Url>,
        request_headers: &HeaderMap,
        default_ttl: Duration,
    ) -> Result<Self> {
        let (head, body) = response.into_head_and_body();
        let mut url = url
            .or(head.url)
            .ok_or_else(|| error::validation("response has no url to be cached under"))?;
        url.set_fragment(None);

        let body = body.collect().await?;

        let ttl = ttl_from_cache_control(&head.headers, default_ttl);
        let vary = parse_vary(&head.headers);
        let request_headers = varied_headers(request_headers, vary.as_deref());
        let stored_at = Instant::now();
        let expires_at = stored_at
            .checked_add(ttl.min(FAR_FUTURE))
            .unwrap_or(stored_at);

        Ok(Self {
            url,
            vary,
            request_headers,
            ttl,
            stored_at,
            expires_at,
            status: head.status,
            version: head.version,
            headers: head.headers,
            body,
        })
    }

    /// Zero-TTL entries are never stored
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        !self.ttl.is_zero()
    }

    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    /// True when `other` is interchangeable with this entry under this entry's `Vary`.
    #[must_use]
    pub fn matches_entry(&self, other: &CacheEntry) -> bool {
        match &self.vary {
            None => true,
            Some(names) => names
                .iter()
                .all(|name| same_values(&self.request_headers, &other.request_headers, name)),
        }
    }

    /// True when this entry may be served for `request`.
    ///
    /// `Vary: *` never matches a request.
    #[must_use]
    pub fn matches_request(&self, request: &HttpRequest) -> bool {
        match &self.vary {
            None => true,
            Some(names) => names.iter().all(|name| {
                name != "*" && same_values(&self.request_headers, request.headers(), name)
            }),
        }
    }

    /// Fresh response carrying copies of the stored data
    #[must_use]
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::from_parts(
            self.status,
            self.version,
            Some(self.url.clone()),
            self.headers.clone(),
            self.body.clone(),
        )
    }
}

/// Copy of the request headers named in `vary`, in `vary` order.
fn varied_headers(request_headers: &HeaderMap, vary: Option<&[String]>) -> HeaderMap {
    let mut kept = HeaderMap::new();
    for name in vary.unwrap_or_default() {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            continue;
        };
        if kept.contains_key(&name) {
            continue;
        }
        for value in request_headers.get_all(&name) {
            kept.append(name.clone(), value.clone());
        }
    }
    kept
}
