use thiserror::Error;

/// Why a document could not be retrieved.
///
/// Callers of the preview pipeline only see the display text; the variants
/// exist for fetcher tests and for callers using [`super::Fetcher`] directly.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("http client setup failed: {0}")]
    Client(String),

    /// Name resolution failed or the peer refused or reset the connection.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    /// The connection broke or the body failed to decompress mid-transfer.
    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Http { status },
            None if err.is_timeout() && err.is_connect() => Self::ConnectTimeout,
            None if err.is_timeout() => Self::RequestTimeout,
            None if err.is_redirect() => Self::RedirectLoop,
            None if err.is_builder() => Self::Client(err.to_string()),
            None if err.is_connect() || err.is_request() => Self::Connect(err.to_string()),
            None => Self::Transfer(err.to_string()),
        }
    }
}
