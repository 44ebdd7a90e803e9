pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use constructors::*;
pub use helpers::{BadScheme, EmptyBatch};
pub use types::{BoxError, Error, Inner, Kind, NETWORK_ERR, Result};

pub type CacheError = Error;
