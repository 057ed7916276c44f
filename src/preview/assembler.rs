use url::Url;

use crate::metadata::MetadataRecord;
use crate::preview::{errors::PreviewError, model::LinkPreview};

/// Turns an aggregated record into a [`LinkPreview`].
///
/// Relative references resolve against `final_url`, the address the
/// document was actually served from. A record without any field is
/// rejected rather than returned as an empty preview.
pub fn assemble(record: MetadataRecord, final_url: &Url) -> Result<LinkPreview, PreviewError> {
    if record.is_empty() {
        return Err(PreviewError::Parse(format!(
            "no preview metadata found at {final_url}"
        )));
    }

    let url = record
        .url
        .as_deref()
        .and_then(absolute_url)
        .unwrap_or_else(|| final_url.clone());

    let image = record
        .image
        .as_deref()
        .and_then(|image| final_url.join(image).ok())
        .filter(is_web_url);

    Ok(LinkPreview {
        url,
        title: record.title,
        description: record.description,
        image,
        kind: record.kind,
        site_name: record.site_name,
    })
}

fn absolute_url(raw: &str) -> Option<Url> {
    Url::parse(raw).ok().filter(is_web_url)
}

/// http(s) with a host; `javascript:`, `data:` and friends are not previewable.
fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty())
}
