//! HTTP response caching with Vary-aware variants and lazy TTL expiry
//!
//! This module provides named HTTP response caches using:
//! - Concurrent `DashMap` storage keyed by URL, one ordered variant list per URL
//! - Per-URL exclusive sections for every read-modify-write of a variant list
//! - TTL derived from `Cache-Control` with a one second `max-age` floor
//! - `Vary` matching against a snapshot of the storing request's headers
//! - Pull-based expiry: expired variants disappear when a lookup scans past them

pub mod cache_config;
pub mod cache_entry;
pub mod cache_stats;
pub mod directives;
pub mod store;

pub use cache_config::CacheConfig;
pub use cache_entry::CacheEntry;
pub use cache_stats::{CacheStats, CacheStatsSnapshot};
pub use directives::{parse_vary, ttl_from_cache_control};
pub use store::Cache;
