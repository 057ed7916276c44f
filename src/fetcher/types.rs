use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

/// Raw payload handed from a [`Fetcher`](super::Fetcher) to the parser.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL after redirects; relative references in the markup resolve against it.
    pub final_url: Url,
    pub status: StatusCode,
    pub content_type: Option<String>,
    /// Encoding label as declared by the server or the document, e.g. `"utf-8"`.
    pub declared_charset: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Successful HTML response with no headers beyond the essentials.
    pub fn html(final_url: Url, body: impl Into<Bytes>) -> Self {
        Self {
            final_url,
            status: StatusCode::OK,
            content_type: Some("text/html".to_string()),
            declared_charset: None,
            body: body.into(),
        }
    }

    pub fn with_charset(mut self, label: impl Into<String>) -> Self {
        self.declared_charset = Some(label.into());
        self
    }
}
