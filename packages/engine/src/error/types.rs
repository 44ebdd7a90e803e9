use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `swcache_engine::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Type-erased error, as produced by fetch collaborators and body streams.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Numeric code carried by network-scheme denials (`NETWORK_ERR`).
pub const NETWORK_ERR: u16 = 19;

/// Represents errors that can occur while populating or querying a cache.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<BoxError>,
    pub url: Option<url::Url>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Malformed input: empty batch, unparsable URL, invalid header, bad config
    Validation,
    /// Scheme is neither http nor https and could not be rewritten
    NetworkScheme { code: u16 },
    /// Failure reported by the fetch collaborator
    Transport,
    /// Response body stream failed while being buffered
    Body,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<BoxError>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.inner.url.as_ref()
    }

    /// Take the underlying error out, e.g. to recover a transport failure
    /// exactly as the fetch collaborator reported it.
    #[must_use]
    pub fn into_source(self) -> Option<BoxError> {
        self.inner.source
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("swcache::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Validation => f.write_str("validation error")?,
            Kind::NetworkScheme { code } => write!(f, "Network error (code {code})")?,
            Kind::Transport => f.write_str("fetch failed")?,
            Kind::Body => f.write_str("response body error")?,
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
