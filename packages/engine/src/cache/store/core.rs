//! Core `Cache` structure and initialization
//!
//! A `Cache` is a cheap, clonable handle; clones share one variant store.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use super::super::{
    cache_config::CacheConfig,
    cache_entry::CacheEntry,
    cache_stats::{CacheStats, CacheStatsSnapshot},
};
use crate::fetch::Fetch;
use crate::http::HttpRequest;

/// A single named HTTP response cache
#[derive(Clone)]
pub struct Cache {
    pub(super) inner: Arc<CacheInner>,
}

pub(super) struct CacheInner {
    pub(super) name: String,
    /// URL -> variants, oldest first
    pub(super) entries: DashMap<String, Vec<CacheEntry>>,
    pub(super) config: CacheConfig,
    pub(super) fetcher: Arc<dyn Fetch>,
    pub(super) stats: CacheStats,
}

impl Cache {
    /// Create an empty cache
    pub fn new(name: impl Into<String>, config: CacheConfig, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                name: name.into(),
                entries: DashMap::new(),
                config,
                fetcher,
                stats: CacheStats::new(),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    pub(super) fn origin(&self) -> Option<&Url> {
        self.inner.config.origin.as_ref()
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.inner.stats.snapshot()
    }

    /// True when both handles refer to the same underlying store
    #[must_use]
    pub fn ptr_eq(&self, other: &Cache) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Distinct URLs currently stored, as GET requests.
    ///
    /// Expired variants are still listed until a lookup evicts them.
    #[must_use]
    pub fn keys(&self) -> Vec<HttpRequest> {
        self.inner
            .entries
            .iter()
            .filter_map(|slot| slot.value().first().map(|entry| HttpRequest::get(entry.url.clone())))
            .collect()
    }

    /// Number of stored variants across all URLs
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.iter().map(|slot| slot.value().len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.inner.name)
            .field("urls", &self.inner.entries.len())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
