//! Cache configuration and preset policies
//!
//! Provides `CacheConfig`, shared by every cache a registry opens: the TTL
//! applied to responses without usable `Cache-Control`, and the origin that
//! root-relative URLs are resolved against.

use std::time::Duration;

use url::Url;

use crate::error::{self, Result};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for responses without `Cache-Control`, or whose directives carry no
    /// usable `max-age`. Zero makes such responses non-cacheable.
    pub default_ttl: Duration,
    /// Origin used to resolve root-relative URLs such as `/wiki/Test`
    pub origin: Option<Url>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300), // 5 minutes
            origin: None,
        }
    }
}

impl CacheConfig {
    /// Long default TTL for mostly static content
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            default_ttl: Duration::from_secs(3600), // 1 hour
            origin: None,
        }
    }

    /// Short default TTL for frequently changing content
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            default_ttl: Duration::from_secs(60),
            origin: None,
        }
    }

    /// Only responses with an explicit `max-age` are stored
    #[must_use]
    pub fn no_cache() -> Self {
        Self {
            default_ttl: Duration::ZERO,
            origin: None,
        }
    }

    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Check the configuration before caches are built from it.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the origin is not an http(s) URL with a host.
    pub fn validate(&self) -> Result<()> {
        if let Some(origin) = &self.origin {
            if !matches!(origin.scheme(), "http" | "https") {
                return Err(error::configuration(format!(
                    "origin must use http or https, got {}",
                    origin.scheme()
                )));
            }
            if !origin.has_host() {
                return Err(error::configuration(format!("origin {origin} has no host")));
            }
        }
        Ok(())
    }
}
