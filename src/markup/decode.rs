use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// Decodes a document body to text.
///
/// Uses the declared encoding when encoding_rs recognizes the label, UTF-8
/// otherwise. A byte order mark overrides both. Malformed sequences become
/// U+FFFD instead of failing.
pub fn decode<'a>(body: &'a [u8], declared_charset: Option<&str>) -> Cow<'a, str> {
    let encoding = declared_charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        debug!(encoding = used.name(), "replaced malformed byte sequences");
    }
    text
}
