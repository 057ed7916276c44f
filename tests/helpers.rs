#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use url::Url;

use linkcard::{
    Config, FetchError, FetchResult, Fetcher, Previewer, SourcePriority, config::LogFormat,
    telemetry,
};

pub fn init_tracing() {
    telemetry::init_tracing(LogFormat::Text);
}

/// Deterministic in-memory fetcher that counts how often it is called.
#[derive(Clone)]
pub struct StubFetcher {
    calls: Arc<AtomicUsize>,
    response: Result<(String, Vec<u8>), &'static str>,
}

impl StubFetcher {
    pub fn serving(final_url: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            response: Ok((final_url.to_string(), body.into())),
        }
    }

    pub fn failing(reason: &'static str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            response: Err(reason),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, _url: &Url) -> Result<FetchResult, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok((final_url, body)) => Ok(FetchResult::html(Url::parse(final_url)?, body.clone())),
            Err(reason) => Err(FetchError::Connect(reason.to_string())),
        }
    }
}

pub fn stub_previewer(fetcher: &StubFetcher) -> Previewer<StubFetcher> {
    Previewer::new(fetcher.clone(), SourcePriority::default())
}

pub fn http_previewer() -> Previewer<linkcard::HttpFetcher> {
    Previewer::from_config(&Config::default()).expect("Failed to build HTTP previewer")
}
