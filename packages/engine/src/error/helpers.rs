use std::fmt;

/// A marker type to indicate that a URL scheme cannot be fetched.
#[derive(Debug)]
pub struct BadScheme;

impl fmt::Display for BadScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bad scheme")
    }
}

impl std::error::Error for BadScheme {}

/// A marker type to indicate that an `add_all` batch had no requests.
#[derive(Debug)]
pub struct EmptyBatch;

impl fmt::Display for EmptyBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("add_all requires at least one request")
    }
}

impl std::error::Error for EmptyBatch {}
