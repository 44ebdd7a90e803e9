//! HTTP request type used as a cache key and as fetch input

use http::{HeaderMap, HeaderValue, Method};
use url::Url;

use super::headers::parse_header;
use crate::error::{self, Result};

/// HTTP request handle: method, absolute URL and headers.
///
/// Requests are cheap to clone; the cache keeps a snapshot of a request's
/// headers next to every stored response so later lookups can be compared
/// against the headers named by `Vary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }

    /// GET request for `url`
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Parse `url` and build a GET request for it.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `url` is not an absolute URL.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(error::invalid_url)?;
        Ok(Self::get(url))
    }

    /// Adds a header, keeping any existing values for the same name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name or value is malformed.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let (name, value) = parse_header(name, value).map_err(error::invalid_header)?;
        self.headers.append(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// First value for `name`, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }
}
