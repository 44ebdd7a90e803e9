//! swcache prelude
//!
//! The types a cache host needs. Only canonical types that are part of the
//! public API belong here.

// Caches and the registry that owns them
pub use crate::cache::{Cache, CacheConfig, CacheEntry, CacheStatsSnapshot};
pub use crate::registry::CacheRegistry;

// HTTP message types
pub use crate::http::{Body, HttpRequest, HttpResponse, RequestInfo};

// Fetch collaborator seam
pub use crate::fetch::{Fetch, NoNetwork, Offline};

// Error types
pub use crate::error::{BoxError, CacheError, Error, Result};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};

// URL handling
pub use url::Url;
