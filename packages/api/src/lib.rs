//! # swcache
//!
//! Named HTTP response caches for hosts that run service-worker style code.
//! A registry is built explicitly and owned by the host; scripts open caches
//! by name, fill them with `put`/`add_all`, and answer later requests with
//! `match_request`.
//!
//! ```rust
//! use swcache::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let registry = swcache::builder()
//!     .origin("https://en.wikipedia.org")
//!     .default_ttl_secs(600)
//!     .build()?;
//!
//! let cache = registry.open("my-site-cache-v1");
//! cache.put("/wiki/Test", HttpResponse::new("<html>tpl</html>")).await?;
//!
//! let hit = cache.match_request("https://en.wikipedia.org/wiki/Test")?;
//! assert!(hit.is_some());
//! # Ok::<(), swcache::Error>(())
//! # }).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

// Re-export all public API components
pub use builder::*;

pub use swcache_engine::prelude;
pub use swcache_engine::prelude::*;
pub use swcache_engine::{cache, error, fetch, http, registry};

/// Main entry point providing static constructors
pub struct SwCache;

impl SwCache {
    /// Create a new registry builder
    ///
    /// Shorthand for `CacheStorageBuilder::new()`
    #[must_use]
    pub fn builder() -> CacheStorageBuilder {
        CacheStorageBuilder::new()
    }

    /// Registry with default options and no network access
    #[must_use]
    pub fn offline() -> CacheRegistry {
        CacheRegistry::default()
    }
}

/// Create a new registry builder
///
/// Shorthand for `CacheStorageBuilder::new()`
#[must_use]
pub fn builder() -> CacheStorageBuilder {
    CacheStorageBuilder::new()
}
