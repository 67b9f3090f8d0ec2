//! Infrastructure layer: network and filesystem collaborators
//!
//! Thin single-purpose wrappers around the MediaWiki API, JSON persistence,
//! gzip, and hashing. No trimming policy lives here.

pub mod compress;
pub mod error;
pub mod fetch;
pub mod hash;
pub mod serialize;

pub use error::{InfraError, InfraResult};
pub use fetch::{Fetcher, HttpFetcher};
