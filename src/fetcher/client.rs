use crate::config::Config;
use crate::fetcher::{errors::FetchError, pipeline::process_response, types::FetchResult};
use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::{Client, ClientBuilder, header};
use tracing::{debug, instrument};
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Transport seam between the preview pipeline and the network.
///
/// Implementations perform a single GET, follow redirects themselves and
/// report the final URL. Retries, if any, are the implementation's business.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchError> {
        (**self).fetch(url).await
    }
}

/// reqwest-backed [`Fetcher`] that only accepts HTML documents.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_HTML));

        let client = ClientBuilder::new()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects()))
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchError> {
        let mut response = self.client.get(url.clone()).send().await?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > self.max_body_bytes
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        // Content-Length may be missing (compressed or chunked) or wrong
        let mut buf = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            buf.extend_from_slice(&chunk);
            if buf.len() as u64 > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge(buf.len() as u64));
            }
        }
        let body = buf.freeze();

        debug!(%final_url, %status, bytes = body.len(), "fetched document");
        Ok(process_response(final_url, status, body, &content_type))
    }
}
