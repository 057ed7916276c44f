//! Finds the URL to preview inside free text.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// `http://` or `https://` followed by a run that stops at whitespace,
/// angle brackets, closing brackets or quotes.
static URL_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"'\)\]\}]+"#).unwrap());

/// Characters that commonly follow a URL in prose without being part of it.
const TRAILING_PUNCTUATION: &[char] = &[')', '.', ',', '>', '"', '\'', ';', ':', '!', '?'];

/// The single URL selected from the caller's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl {
    raw: String,
    url: Url,
}

impl CandidateUrl {
    /// The substring as it appeared in the text, trailing punctuation removed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

/// Returns the first absolute `http`/`https` URL in `text`, scanning left to right.
pub fn locate(text: &str) -> Option<CandidateUrl> {
    URL_CANDIDATE
        .find_iter(text)
        .filter(|m| !glued_to_ascii_word(text, m.start()))
        .find_map(|m| candidate(m.as_str()))
}

/// A scheme directly after an ASCII letter or digit is part of another word
/// (`xhttp://`). Any other neighbour, CJK text or `_` included, is a boundary.
fn glued_to_ascii_word(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric())
}

fn candidate(matched: &str) -> Option<CandidateUrl> {
    let raw = matched.trim_end_matches(TRAILING_PUNCTUATION);
    let url = Url::parse(raw).ok()?;
    if url.host_str().is_none_or(str::is_empty) {
        return None;
    }

    Some(CandidateUrl {
        raw: raw.to_string(),
        url,
    })
}
