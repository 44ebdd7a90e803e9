//! HTTP message abstractions used by the cache
//!
//! This module provides the request and response types the cache stores and
//! returns, header helpers, and `RequestInfo`, the tagged input accepted by
//! every cache operation that takes "a request or a URL".

pub mod headers;
pub mod request;
pub mod request_info;
pub mod response;

pub use headers::*;
pub use request::*;
pub use request_info::*;
pub use response::*;
