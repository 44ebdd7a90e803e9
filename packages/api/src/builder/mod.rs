//! Cache storage builder
//!
//! Provides the fluent API for configuring and constructing a
//! `CacheRegistry` with method chaining.

mod core;

pub use self::core::*;
