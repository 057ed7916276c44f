use thiserror::Error;

use crate::fetcher::FetchError;

/// Machine-readable failure code of a preview request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoUrlFound,
    ParseError,
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("no url found in text")]
    NoUrlFound,

    /// Anything after a URL was found: transport failure, unusable body,
    /// or a document without any preview metadata.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PreviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoUrlFound => ErrorKind::NoUrlFound,
            Self::Parse(_) => ErrorKind::ParseError,
        }
    }

    /// Human-readable description without the kind prefix.
    pub fn description(&self) -> &str {
        match self {
            Self::NoUrlFound => "no url found in text",
            Self::Parse(reason) => reason,
        }
    }
}

impl From<FetchError> for PreviewError {
    fn from(err: FetchError) -> Self {
        Self::Parse(err.to_string())
    }
}
