//! Registry of named caches
//!
//! A `CacheRegistry` is an ordinary value owned by whatever hosts the caches;
//! there is no process-wide instance. Every cache it opens shares the
//! registry's configuration and fetcher.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::cache::{Cache, CacheConfig};
use crate::error::Result;
use crate::fetch::{Fetch, NoNetwork};
use crate::http::{HttpResponse, RequestInfo};

/// Name -> cache map, created lazily on `open`
pub struct CacheRegistry {
    caches: DashMap<String, Cache>,
    config: CacheConfig,
    fetcher: Arc<dyn Fetch>,
}

impl CacheRegistry {
    /// Registry whose caches cannot fetch; `add_all` fails with a transport error.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self::with_fetcher(config, Arc::new(NoNetwork))
    }

    #[must_use]
    pub fn with_fetcher(config: CacheConfig, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            caches: DashMap::new(),
            config,
            fetcher,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the cache called `name`, creating it on first use.
    ///
    /// Creation happens under the map's entry lock, so concurrent first opens
    /// of one name all receive the same cache.
    pub fn open(&self, name: &str) -> Cache {
        self.caches
            .entry(name.to_owned())
            .or_insert_with(|| {
                tracing::debug!(target: "swcache::registry", cache = name, "Creating cache");
                Cache::new(name, self.config.clone(), Arc::clone(&self.fetcher))
            })
            .clone()
    }

    /// Drop the cache called `name`. Returns true iff it existed.
    ///
    /// Handles already handed out keep their (now detached) contents; the
    /// next `open` starts from an empty cache.
    pub fn delete(&self, name: &str) -> bool {
        let removed = self.caches.remove(name).is_some();
        if removed {
            tracing::debug!(target: "swcache::registry", cache = name, "Deleted cache");
        }
        removed
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.caches.contains_key(name)
    }

    /// Names of all caches, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.iter().map(|cache| cache.key().clone()).collect();
        names.sort();
        names
    }

    /// First match for `request` across all caches, searched in name order.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `request` cannot be resolved to a URL.
    pub fn match_request(&self, request: impl Into<RequestInfo>) -> Result<Option<HttpResponse>> {
        let request = request.into();
        for name in self.keys() {
            let Some(cache) = self.caches.get(&name).map(|cache| cache.value().clone()) else {
                continue;
            };
            if let Some(response) = cache.match_request(request.clone())? {
                return Ok(Some(response));
            }
        }
        Ok(None)
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("caches", &self.keys())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
