pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{Fetcher, HttpFetcher};
pub use errors::FetchError;
pub use types::FetchResult;

#[cfg(test)]
pub use client::MockFetcher;
