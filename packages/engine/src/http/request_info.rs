//! Conversion of "a request or a URL string" into a request handle
//!
//! Every element is validated up front, before anything touches the cache or
//! the network. Parsing happens in two stages so a batch can be rejected as a
//! whole for malformed input before any scheme is looked at.

use http::{HeaderMap, Method};
use url::Url;

use super::request::HttpRequest;
use crate::error::{self, Result};

/// Input accepted by cache operations: a full request, or a bare URL string.
#[derive(Debug, Clone)]
pub enum RequestInfo {
    Request(HttpRequest),
    Url(String),
}

impl From<HttpRequest> for RequestInfo {
    fn from(request: HttpRequest) -> Self {
        RequestInfo::Request(request)
    }
}

impl From<&HttpRequest> for RequestInfo {
    fn from(request: &HttpRequest) -> Self {
        RequestInfo::Request(request.clone())
    }
}

impl From<Url> for RequestInfo {
    fn from(url: Url) -> Self {
        RequestInfo::Request(HttpRequest::get(url))
    }
}

impl From<&Url> for RequestInfo {
    fn from(url: &Url) -> Self {
        RequestInfo::Request(HttpRequest::get(url.clone()))
    }
}

impl From<String> for RequestInfo {
    fn from(url: String) -> Self {
        RequestInfo::Url(url)
    }
}

impl From<&String> for RequestInfo {
    fn from(url: &String) -> Self {
        RequestInfo::Url(url.clone())
    }
}

impl From<&str> for RequestInfo {
    fn from(url: &str) -> Self {
        RequestInfo::Url(url.to_string())
    }
}

/// Where a parsed request points
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    Absolute(Url),
    /// Path (with optional query) still to be resolved against an origin
    RootRelative(String),
}

/// A request whose URL text has been validated but not yet resolved.
#[derive(Debug, Clone)]
pub(crate) struct ParsedRequest {
    method: Method,
    target: Target,
    headers: HeaderMap,
}

impl RequestInfo {
    /// Validate the URL text without resolving it.
    pub(crate) fn parse(self) -> Result<ParsedRequest> {
        match self {
            RequestInfo::Request(request) => {
                let method = request.method().clone();
                let url = request.url().clone();
                let headers = request.headers().clone();
                Ok(ParsedRequest {
                    method,
                    target: Target::Absolute(url),
                    headers,
                })
            }
            RequestInfo::Url(text) => Ok(ParsedRequest {
                method: Method::GET,
                target: parse_target(&text)?,
                headers: HeaderMap::new(),
            }),
        }
    }

    /// Resolve into a request usable as a cache key.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unparsable URLs, or for root-relative
    /// URLs when no origin is given.
    pub fn into_request(self, origin: Option<&Url>) -> Result<HttpRequest> {
        self.parse()?.for_lookup(origin)
    }
}

impl ParsedRequest {
    /// Resolve for a cache lookup or put; any absolute scheme is accepted.
    pub(crate) fn for_lookup(self, origin: Option<&Url>) -> Result<HttpRequest> {
        let url = match self.target {
            Target::Absolute(url) => url,
            Target::RootRelative(path) => match origin {
                Some(origin) => origin.join(&path).map_err(error::invalid_url)?,
                None => {
                    return Err(error::validation(format!(
                        "relative url {path:?} needs a configured origin"
                    )));
                }
            },
        };
        Ok(HttpRequest::new(self.method, without_fragment(url)).with_headers(self.headers))
    }

    /// Resolve for a network fetch; only http and https may leave the process.
    pub(crate) fn for_fetch(self, origin: Option<&Url>) -> Result<HttpRequest> {
        let url = match self.target {
            Target::Absolute(url) if is_fetchable(&url) => url,
            Target::Absolute(url) => return Err(error::network_scheme(url)),
            Target::RootRelative(path) => {
                let origin = origin.ok_or_else(|| error::network_scheme_relative(&path))?;
                let url = origin.join(&path).map_err(error::invalid_url)?;
                if !is_fetchable(&url) {
                    return Err(error::network_scheme(url));
                }
                url
            }
        };
        Ok(HttpRequest::new(self.method, without_fragment(url)).with_headers(self.headers))
    }
}

/// Fragments never reach the network, so they are not part of a cache key.
fn without_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

pub(crate) fn is_fetchable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn parse_target(text: &str) -> Result<Target> {
    let text = text.trim();

    // protocol-relative urls go out over https
    if text.starts_with("//") {
        let url = Url::parse(&format!("https:{text}")).map_err(error::invalid_url)?;
        return Ok(Target::Absolute(url));
    }

    match Url::parse(text) {
        Ok(url) => Ok(Target::Absolute(url)),
        Err(url::ParseError::RelativeUrlWithoutBase) if text.starts_with('/') => {
            Ok(Target::RootRelative(text.to_string()))
        }
        Err(e) => Err(error::invalid_url(e)),
    }
}
