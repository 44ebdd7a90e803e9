use super::types::{BoxError, Error, Kind, NETWORK_ERR};

/// Creates an `Error` for malformed caller input.
pub fn validation<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Validation).with(e.into())
}

/// Creates an `Error` for a URL whose scheme cannot go to the network.
pub fn network_scheme(url: url::Url) -> Error {
    Error::new(Kind::NetworkScheme { code: NETWORK_ERR })
        .with(super::helpers::BadScheme)
        .with_url(url)
}

/// Creates an `Error` for a root-relative URL with no origin to resolve against.
pub fn network_scheme_relative(path: &str) -> Error {
    Error::new(Kind::NetworkScheme { code: NETWORK_ERR })
        .with(format!("cannot resolve relative url {path:?} without an origin"))
}

/// Wraps a failure reported by the fetch collaborator, unmodified.
pub fn transport(e: BoxError, url: url::Url) -> Error {
    Error::new(Kind::Transport).with(e).with_url(url)
}

/// Creates an `Error` for a body stream that failed while buffering.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

pub fn invalid_url<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Validation).with(e.into())
}

pub fn invalid_header<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Validation).with(e.into())
}

pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Validation).with(e.into())
}
