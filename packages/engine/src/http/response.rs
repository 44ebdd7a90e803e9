//! HTTP response type with a buffered or streaming body
//!
//! A response handed to the cache may carry a live body stream; the cache
//! drains it into `Bytes` once, at store time. Responses handed back by the
//! cache always carry a buffered body, so they can be cloned and re-read.

use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use http::{HeaderMap, HeaderValue, StatusCode, Version};
use url::Url;

use super::headers::parse_header;
use crate::error::{self, BoxError, Result};

/// Boxed stream of body chunks
pub type BodyStream = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, BoxError>> + Send>>;

/// Response body: fully buffered, or a stream that can be read exactly once.
pub enum Body {
    Full(Bytes),
    Streaming(BodyStream),
}

impl Body {
    #[must_use]
    pub fn empty() -> Self {
        Body::Full(Bytes::new())
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, BoxError>> + Send + 'static,
    {
        Body::Streaming(Box::pin(stream))
    }

    /// Buffered bytes, if the body has already been read into memory.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Full(bytes) => Some(bytes),
            Body::Streaming(_) => None,
        }
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        matches!(self, Body::Streaming(_))
    }

    /// Read the full body into memory.
    ///
    /// # Errors
    ///
    /// Returns a body error if the underlying stream yields an error.
    pub async fn collect(self) -> Result<Bytes> {
        match self {
            Body::Full(bytes) => Ok(bytes),
            Body::Streaming(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk.map_err(error::body)?);
                }
                Ok(buf.freeze())
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            Body::Streaming(_) => f.write_str("Streaming"),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Full(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Full(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Full(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Body::Full(Bytes::from_static(text.as_bytes()))
    }
}

/// HTTP response: status, headers, optional URL and body.
#[derive(Debug)]
pub struct HttpResponse {
    status: StatusCode,
    version: Version,
    url: Option<Url>,
    headers: HeaderMap,
    body: Body,
}

impl HttpResponse {
    /// 200 OK response with the given body and no headers
    pub fn new(body: impl Into<Body>) -> Self {
        Self {
            status: StatusCode::OK,
            version: Version::HTTP_11,
            url: None,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, BoxError>> + Send + 'static,
    {
        Self::new(Body::from_stream(stream))
    }

    pub(crate) fn from_parts(
        status: StatusCode,
        version: Version,
        url: Option<Url>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            status,
            version,
            url,
            headers,
            body: Body::Full(body),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
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
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
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

    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Clone the response. Fails (returns `None`) while the body is still a stream.
    #[must_use]
    pub fn try_clone(&self) -> Option<Self> {
        let body = self.body.as_bytes()?.clone();
        Some(Self::from_parts(
            self.status,
            self.version,
            self.url.clone(),
            self.headers.clone(),
            body,
        ))
    }

    /// Split off the head so the body can be consumed separately.
    pub(crate) fn into_head_and_body(self) -> (ResponseHead, Body) {
        (
            ResponseHead {
                status: self.status,
                version: self.version,
                url: self.url,
                headers: self.headers,
            },
            self.body,
        )
    }

    /// Consume the response and read the full body.
    ///
    /// # Errors
    ///
    /// Returns a body error if the body stream fails.
    pub async fn bytes(self) -> Result<Bytes> {
        self.body.collect().await
    }

    /// Consume the response and read the body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns a body error if the body stream fails or is not valid UTF-8.
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(error::body)
    }
}

/// Status line, URL and headers of a response whose body was split off
#[derive(Debug, Clone)]
pub(crate) struct ResponseHead {
    pub status: StatusCode,
    pub version: Version,
    pub url: Option<Url>,
    pub headers: HeaderMap,
}
