//! Cache operations for put, match and delete
//!
//! Core caching operations with HTTP semantics: `Vary`-aware replacement on
//! put, newest-first lookup, and lazy eviction of expired variants.

use tokio::time::Instant;

use super::super::cache_entry::CacheEntry;
use super::core::Cache;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse, RequestInfo};

impl Cache {
    /// Store `response` under `request`.
    ///
    /// The body is read to the end before anything is stored. Responses whose
    /// TTL works out to zero are accepted and silently not stored. Existing
    /// variants that the new one matches under its `Vary`, and variants that
    /// have already expired, are dropped; the new variant becomes the newest.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unusable request or URL, or a body
    /// error if the response body cannot be read.
    pub async fn put(&self, request: impl Into<RequestInfo>, response: HttpResponse) -> Result<()> {
        let request = request.into().parse()?.for_lookup(self.origin())?;
        let entry = CacheEntry::new(
            response,
            Some(request.url().clone()),
            request.headers(),
            self.inner.config.default_ttl,
        )
        .await?;

        self.store(entry);
        Ok(())
    }

    /// Commit a built entry; the scan-and-rebuild runs under the URL's lock.
    pub(super) fn store(&self, entry: CacheEntry) {
        if !entry.is_cacheable() {
            self.inner.stats.record_uncacheable();
            tracing::debug!(
                target: "swcache::cache",
                cache = %self.inner.name,
                url = %entry.url,
                "Response not cacheable, skipping store"
            );
            return;
        }

        let now = Instant::now();
        let url = entry.url.clone();
        let ttl_secs = entry.ttl.as_secs();
        let mut expired = 0u64;
        let mut replaced = 0u64;

        let variants = {
            let mut slot = self.inner.entries.entry(url.as_str().to_owned()).or_default();
            slot.retain(|old| {
                if old.is_expired_at(now) {
                    expired += 1;
                    false
                } else if entry.matches_entry(old) {
                    replaced += 1;
                    false
                } else {
                    true
                }
            });
            slot.push(entry);
            slot.len()
        };

        self.inner.stats.record_store();
        self.inner.stats.record_replacements(replaced);
        self.inner.stats.record_evictions(expired);

        tracing::debug!(
            target: "swcache::cache",
            cache = %self.inner.name,
            url = %url,
            ttl_secs = ttl_secs,
            replaced = replaced,
            evicted = expired,
            variants = variants,
            "Stored response"
        );
    }

    /// Newest unexpired variant that matches `request`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `request` cannot be resolved to a URL.
    pub fn match_request(&self, request: impl Into<RequestInfo>) -> Result<Option<HttpResponse>> {
        let request = request.into().parse()?.for_lookup(self.origin())?;
        let found = self
            .scan_live(&request, |live| {
                live.iter()
                    .rev()
                    .find(|entry| entry.matches_request(&request))
                    .map(CacheEntry::to_response)
            })
            .flatten();

        self.record_lookup(&request, found.is_some());
        Ok(found)
    }

    /// Every unexpired variant that matches `request`, oldest first.
    ///
    /// Returns `None` rather than an empty list when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `request` cannot be resolved to a URL.
    pub fn match_all(&self, request: impl Into<RequestInfo>) -> Result<Option<Vec<HttpResponse>>> {
        let request = request.into().parse()?.for_lookup(self.origin())?;
        let found = self
            .scan_live(&request, |live| {
                live.iter()
                    .filter(|entry| entry.matches_request(&request))
                    .map(CacheEntry::to_response)
                    .collect::<Vec<_>>()
            })
            .filter(|responses| !responses.is_empty());

        self.record_lookup(&request, found.is_some());
        Ok(found)
    }

    /// Remove every variant stored for the request's URL.
    ///
    /// Returns true iff at least one variant was removed.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `request` cannot be resolved to a URL.
    pub fn delete(&self, request: impl Into<RequestInfo>) -> Result<bool> {
        let request = request.into().parse()?.for_lookup(self.origin())?;
        let removed = self
            .inner
            .entries
            .remove(request.url().as_str())
            .map_or(0, |(_, variants)| variants.len());

        if removed > 0 {
            tracing::debug!(
                target: "swcache::cache",
                cache = %self.inner.name,
                url = %request.url(),
                removed = removed,
                "Deleted cached variants"
            );
        }
        Ok(removed > 0)
    }

    /// Evict expired variants for the request's URL, then run `read` over the
    /// survivors. A URL left without variants is removed from the map.
    fn scan_live<T>(
        &self,
        request: &HttpRequest,
        read: impl FnOnce(&[CacheEntry]) -> T,
    ) -> Option<T> {
        let key = request.url().as_str();
        let now = Instant::now();

        let (result, evicted, now_empty) = {
            let mut slot = self.inner.entries.get_mut(key)?;
            let before = slot.len();
            slot.retain(|entry| !entry.is_expired_at(now));
            let evicted = before - slot.len();
            (read(slot.as_slice()), evicted, slot.is_empty())
        };

        if evicted > 0 {
            self.inner.stats.record_evictions(evicted as u64);
            tracing::debug!(
                target: "swcache::cache",
                cache = %self.inner.name,
                url = %request.url(),
                evicted = evicted,
                "Evicted expired variants"
            );
        }

        if now_empty {
            self.inner.entries.remove_if(key, |_, variants| variants.is_empty());
        }

        Some(result)
    }

    fn record_lookup(&self, request: &HttpRequest, hit: bool) {
        if hit {
            self.inner.stats.record_hit();
        } else {
            self.inner.stats.record_miss();
        }
        tracing::trace!(
            target: "swcache::cache",
            cache = %self.inner.name,
            url = %request.url(),
            hit = hit,
            "Cache lookup"
        );
    }
}
