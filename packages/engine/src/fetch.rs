//! Seam for the outbound fetch collaborator
//!
//! The cache never performs network I/O itself. `Cache::add_all` hands each
//! resolved request to an injected `Fetch` implementation and propagates its
//! failures untouched.

use std::future::Future;

use futures::future::BoxFuture;
use thiserror::Error;
use url::Url;

use crate::error::BoxError;
use crate::http::{HttpRequest, HttpResponse};

/// Outbound fetch used to populate caches.
///
/// Implemented for any `Fn(HttpRequest) -> impl Future<Output = Result<HttpResponse, BoxError>>`,
/// so a host can inject its HTTP client as a closure.
pub trait Fetch: Send + Sync {
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'static, std::result::Result<HttpResponse, BoxError>>;
}

impl<F, Fut> Fetch for F
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<HttpResponse, BoxError>> + Send + 'static,
{
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'static, std::result::Result<HttpResponse, BoxError>> {
        Box::pin(self(request))
    }
}

/// Fetcher for hosts without network access; every fetch fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNetwork;

/// Failure reported by [`NoNetwork`]
#[derive(Debug, Error)]
#[error("network access is disabled, cannot fetch {url}")]
pub struct Offline {
    pub url: Url,
}

impl Fetch for NoNetwork {
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'static, std::result::Result<HttpResponse, BoxError>> {
        let url = request.url().clone();
        tracing::debug!(target: "swcache::fetch", url = %url, "Fetch attempted with networking disabled");
        Box::pin(async move { Err(Box::new(Offline { url }) as BoxError) })
    }
}
