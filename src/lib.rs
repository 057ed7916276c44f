//! Link previews from free text.
//!
//! [`Previewer::preview`] finds the first http(s) URL in a piece of text,
//! fetches it and derives a title, description, canonical URL, image, type
//! and site name from Open Graph, Twitter Card and plain HTML markup.

pub mod config;
pub mod fetcher;
pub mod locator;
pub mod markup;
pub mod metadata;
pub mod preview;
pub mod telemetry;

pub use config::Config;
pub use fetcher::{FetchError, FetchResult, Fetcher, HttpFetcher};
pub use locator::{CandidateUrl, locate};
pub use metadata::{MetadataRecord, Source, SourcePriority};
pub use preview::{ErrorKind, LinkPreview, PreviewError, Previewer};
