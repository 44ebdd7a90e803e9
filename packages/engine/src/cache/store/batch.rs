//! Batch population: fetch a set of requests, then store them all or nothing
//!
//! Input is validated and resolved before any fetch starts. Fetches fan out
//! concurrently and are all allowed to settle; if any failed, nothing is
//! stored. Bodies are buffered and entries built before the first commit, so a
//! body failure also leaves the cache untouched.

use futures::future::{join_all, try_join_all};

use super::super::cache_entry::CacheEntry;
use super::core::Cache;
use crate::error::{self, EmptyBatch, Result};
use crate::http::{HttpRequest, RequestInfo};

impl Cache {
    /// Fetch and store a single request.
    ///
    /// # Errors
    ///
    /// See [`Cache::add_all`].
    pub async fn add(&self, request: impl Into<RequestInfo>) -> Result<()> {
        self.add_all([request]).await
    }

    /// Fetch every request concurrently and store each response under the
    /// request at the same position.
    ///
    /// # Errors
    ///
    /// - validation error: empty input, or an element that is not a usable URL
    /// - network-scheme error (code 19): a URL that is not http(s) and cannot
    ///   be resolved against the configured origin
    /// - transport error: a fetch failed; the collaborator's error is the source
    /// - body error: a fetched body could not be read
    ///
    /// On any error the cache is left exactly as it was.
    pub async fn add_all<I, R>(&self, requests: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<RequestInfo>,
    {
        let parsed = requests
            .into_iter()
            .map(|request| request.into().parse())
            .collect::<Result<Vec<_>>>()?;
        if parsed.is_empty() {
            return Err(error::validation(EmptyBatch));
        }

        let requests = parsed
            .into_iter()
            .map(|request| request.for_fetch(self.origin()))
            .collect::<Result<Vec<HttpRequest>>>()?;

        tracing::debug!(
            target: "swcache::cache",
            cache = %self.inner.name,
            requests = requests.len(),
            "Fetching batch"
        );

        let settled = join_all(requests.iter().map(|request| {
            let url = request.url().clone();
            let fetch = self.inner.fetcher.fetch(request.clone());
            async move { fetch.await.map_err(|e| error::transport(e, url)) }
        }))
        .await;

        let responses = match settled.into_iter().collect::<Result<Vec<_>>>() {
            Ok(responses) => responses,
            Err(e) => {
                tracing::warn!(
                    target: "swcache::cache",
                    cache = %self.inner.name,
                    error = %e,
                    "Batch fetch failed, nothing stored"
                );
                return Err(e);
            }
        };

        let default_ttl = self.inner.config.default_ttl;
        let entries = try_join_all(requests.iter().zip(responses).map(|(request, response)| {
            CacheEntry::new(
                response,
                Some(request.url().clone()),
                request.headers(),
                default_ttl,
            )
        }))
        .await?;

        for entry in entries {
            self.store(entry);
        }
        Ok(())
    }
}
