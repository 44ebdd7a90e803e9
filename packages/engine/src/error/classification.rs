use super::types::{Error, Kind, NETWORK_ERR};

impl Error {
    /// Returns true if the error comes from rejected caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self.inner.kind, Kind::Validation)
    }

    /// Returns true if a request was denied because of its URL scheme.
    #[must_use]
    pub fn is_network_scheme(&self) -> bool {
        matches!(self.inner.kind, Kind::NetworkScheme { .. })
    }

    /// Returns true if the fetch collaborator failed.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.inner.kind, Kind::Transport)
    }

    /// Returns true if a response body could not be read.
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self.inner.kind, Kind::Body)
    }

    /// Stable numeric code for structured network denials.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self.inner.kind {
            Kind::NetworkScheme { code } => Some(code),
            _ => None,
        }
    }

    /// Message paired with `code()`.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self.inner.kind {
            Kind::NetworkScheme { code } if code == NETWORK_ERR => Some("Network error"),
            _ => None,
        }
    }
}
