//! Named cache modules
//!
//! The functionality is organized into logical modules:
//!
//! - `core`: `Cache` handle, construction, keys and size information
//! - `operations`: put, match, match_all and delete with lazy expiry
//! - `batch`: add/add_all, the fetch-then-commit population path
//!
//! Every mutation of a URL's variant list happens while holding that URL's
//! `DashMap` entry exclusively, and never across an `.await`.

pub mod batch;
pub mod core;
pub mod operations;

pub use self::core::Cache;
