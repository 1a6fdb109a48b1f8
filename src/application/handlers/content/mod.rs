//! Content use-case handlers.

mod fetch_resource;

pub use fetch_resource::{FetchResourceHandler, FetchResourceQuery, FetchResourceResult};
