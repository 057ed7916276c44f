use serde::{Deserialize, Serialize};
use url::Url;

/// Finalized preview of a linked page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    /// Canonical page URL: `og:url` when absolute, else the fetched URL.
    pub url: Url,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<Url>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub site_name: Option<String>,
}
