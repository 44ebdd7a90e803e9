//! Core `CacheStorageBuilder` structure
//!
//! Collects the registry-wide options (default TTL, origin, fetcher) and
//! validates them once, in `build`. Setter failures are deferred: the first
//! one is kept and reported by `build`, so chains stay unbroken.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

pub use swcache_engine::{CacheConfig, CacheRegistry, Error, Fetch, NoNetwork, Result};

/// Fluent builder for a [`CacheRegistry`]
#[derive(Clone, Default)]
pub struct CacheStorageBuilder {
    /// Options every opened cache receives
    pub(crate) config: CacheConfig,
    /// Outbound fetch used by `add`/`add_all`; `NoNetwork` when unset
    pub(crate) fetcher: Option<Arc<dyn Fetch>>,
    /// Internal error state for deferred error handling
    pub(crate) error: Option<String>,
}

impl CacheStorageBuilder {
    /// Start from `CacheConfig::default()` with no network access
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// TTL for responses without a usable `max-age`
    #[must_use]
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.config.default_ttl = ttl;
        self
    }

    #[must_use]
    pub fn default_ttl_secs(self, seconds: u64) -> Self {
        self.default_ttl(Duration::from_secs(seconds))
    }

    /// Store only responses carrying an explicit `max-age`
    #[must_use]
    pub fn no_default_ttl(self) -> Self {
        self.default_ttl(Duration::ZERO)
    }

    /// Origin that root-relative URLs such as `/wiki/Test` resolve against
    #[must_use]
    pub fn origin(mut self, origin: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match Url::parse(origin) {
            Ok(url) => self.config.origin = Some(url),
            Err(e) => self.error = Some(format!("Invalid origin {origin:?}: {e}")),
        }
        self
    }

    #[must_use]
    pub fn origin_url(mut self, origin: Url) -> Self {
        self.config.origin = Some(origin);
        self
    }

    /// Fetch collaborator used by `Cache::add`/`Cache::add_all`
    #[must_use]
    pub fn fetcher<F: Fetch + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Share one fetch collaborator between several registries
    #[must_use]
    pub fn shared_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Check if there were any deferred setter errors
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Validate the options and construct the registry.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a setter failed or the configuration
    /// does not validate.
    pub fn build(self) -> Result<CacheRegistry> {
        if let Some(message) = self.error {
            return Err(swcache_engine::error::configuration(message));
        }
        self.config.validate()?;

        tracing::debug!(
            target: "swcache::builder",
            default_ttl_secs = self.config.default_ttl.as_secs(),
            origin = ?self.config.origin.as_ref().map(Url::as_str),
            networked = self.fetcher.is_some(),
            "Building cache registry"
        );

        let fetcher = self.fetcher.unwrap_or_else(|| Arc::new(NoNetwork));
        Ok(CacheRegistry::with_fetcher(self.config, fetcher))
    }
}

impl fmt::Debug for CacheStorageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStorageBuilder")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher.as_ref().map(|_| "custom"))
            .field("error", &self.error)
            .finish()
    }
}
