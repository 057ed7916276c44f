pub mod assembler;
pub mod errors;
pub mod model;

#[cfg(test)]
mod tests;

pub use errors::{ErrorKind, PreviewError};
pub use model::LinkPreview;

use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::locator;
use crate::markup::{self, Tokenizer};
use crate::metadata::{SourcePriority, aggregate};

/// Entry point: text in, one [`LinkPreview`] or one [`PreviewError`] out.
///
/// Holds no per-request state, so a single instance can serve concurrent
/// callers.
#[derive(Debug, Clone)]
pub struct Previewer<F> {
    fetcher: F,
    priority: SourcePriority,
}

impl Previewer<HttpFetcher> {
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(
            HttpFetcher::new(config)?,
            config.source_priority().clone(),
        ))
    }
}

impl<F: Fetcher> Previewer<F> {
    pub fn new(fetcher: F, priority: SourcePriority) -> Self {
        Self { fetcher, priority }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[instrument(skip_all, fields(url))]
    pub async fn preview(&self, text: &str) -> Result<LinkPreview, PreviewError> {
        let Some(candidate) = locator::locate(text) else {
            debug!("no url in text");
            return Err(PreviewError::NoUrlFound);
        };
        tracing::Span::current().record("url", candidate.as_str());

        let fetched = self.fetcher.fetch(candidate.url()).await.map_err(|e| {
            warn!(error = %e, "fetch failed");
            PreviewError::from(e)
        })?;

        let body = markup::decode(&fetched.body, fetched.declared_charset.as_deref());
        let record = aggregate(Tokenizer::new(&body), &self.priority);
        let preview = assembler::assemble(record, &fetched.final_url)?;

        info!(
            final_url = %fetched.final_url,
            has_title = preview.title.is_some(),
            has_image = preview.image.is_some(),
            "preview assembled"
        );
        Ok(preview)
    }
}
