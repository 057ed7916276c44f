use crate::fetcher::types::FetchResult;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252, X_USER_DEFINED};
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

const CHARSET_PRESCAN_BYTES: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn process_response(
    final_url: Url,
    status: StatusCode,
    body: Bytes,
    content_type: &str,
) -> FetchResult {
    let declared_charset = declared_charset(content_type, &body);

    FetchResult {
        final_url,
        status,
        content_type: Some(content_type.to_string()),
        declared_charset,
        body,
    }
}

/// Encoding label declared by the response, normalized to the WHATWG name.
///
/// The `Content-Type` parameter wins over in-document declarations. Labels
/// that encoding_rs does not know are ignored so the decoder falls back to
/// UTF-8.
pub fn declared_charset(content_type: &str, body: &[u8]) -> Option<String> {
    if let Some(encoding) = capture_encoding(&CHARSET_REGEX, content_type) {
        return Some(label_of(encoding));
    }

    let search_bytes = &body[..body.len().min(CHARSET_PRESCAN_BYTES)];
    let search_str = String::from_utf8_lossy(search_bytes);

    capture_encoding(&META_CHARSET_REGEX, &search_str)
        .or_else(|| capture_encoding(&META_HTTP_EQUIV_REGEX, &search_str))
        .map(|encoding| label_of(in_document(encoding)))
}

fn capture_encoding(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let captures = regex.captures(haystack)?;
    let label = captures.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// A document that could be scanned as ASCII is not UTF-16, and
/// `x-user-defined` in markup means windows-1252 (WHATWG prescan rules).
fn in_document(encoding: &'static Encoding) -> &'static Encoding {
    if encoding == UTF_16BE || encoding == UTF_16LE {
        UTF_8
    } else if encoding == X_USER_DEFINED {
        WINDOWS_1252
    } else {
        encoding
    }
}

fn label_of(encoding: &'static Encoding) -> String {
    encoding.name().to_lowercase()
}
