use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Keys of a [`MetadataRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Image,
    Url,
    Type,
    SiteName,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Description,
        Field::Image,
        Field::Url,
        Field::Type,
        Field::SiteName,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// URL-valued fields are trimmed but keep their inner characters.
    pub fn is_url(self) -> bool {
        matches!(self, Field::Image | Field::Url)
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Image => "image",
            Field::Url => "url",
            Field::Type => "type",
            Field::SiteName => "siteName",
        }
    }
}

/// Preview fields as found in the document, before URL resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub site_name: Option<String>,
}

impl MetadataRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Image => &self.image,
            Field::Url => &self.url,
            Field::Type => &self.kind,
            Field::SiteName => &self.site_name,
        };
        value.as_deref()
    }

    pub(crate) fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Image => &mut self.image,
            Field::Url => &mut self.url,
            Field::Type => &mut self.kind,
            Field::SiteName => &mut self.site_name,
        };
        *slot = Some(value);
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

/// Trims and collapses every whitespace run into a single space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}
