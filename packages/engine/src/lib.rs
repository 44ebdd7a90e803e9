//! # swcache engine
//!
//! HTTP-semantics response cache for service-worker style hosts: named
//! caches, each holding one or more response variants per URL, selected with
//! `Vary` and expired with TTLs derived from `Cache-Control`.
//!
//! ## Features
//!
//! - **Named caches** opened lazily through an explicitly owned [`CacheRegistry`]
//! - **Vary-aware variants**: several responses per URL, one per distinct set
//!   of varied request-header values
//! - **Cache-Control TTLs** with a one second `max-age` floor and
//!   `no-cache`/`private` treated as non-cacheable
//! - **Lazy expiry**: no timers, expired variants are dropped on access
//! - **All-or-nothing `add_all`** with concurrent fetches through an injected
//!   [`Fetch`] collaborator
//!
//! ## Usage
//!
//! ```rust
//! use swcache_engine::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let registry = CacheRegistry::new(CacheConfig::default());
//! let cache = registry.open("my-site-cache-v1");
//!
//! let response = HttpResponse::new("<html>template</html>")
//!     .with_header("cache-control", "max-age=60")?;
//! cache.put("https://en.wikipedia.org/wiki/Test", response).await?;
//!
//! let hit = cache.match_request("https://en.wikipedia.org/wiki/Test")?;
//! assert_eq!(hit.unwrap().text().await?, "<html>template</html>");
//! # Ok::<(), swcache_engine::Error>(())
//! # }).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod cache;
pub mod error;
pub mod fetch;
pub mod http;
pub mod registry;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;
