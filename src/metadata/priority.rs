use std::fmt;
use std::str::FromStr;

/// Where a metadata value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// `og:*` meta properties.
    OpenGraph,
    /// `twitter:*` meta names.
    TwitterCard,
    /// `<title>`, `<meta name="description">` and the first `<img>`.
    Html,
    /// First substantial `<p>` of the page.
    BodyText,
}

impl Source {
    /// Structured vocabularies let a later tag replace an earlier one of the
    /// same kind; heuristics keep whatever they found first.
    pub fn later_wins(self) -> bool {
        matches!(self, Source::OpenGraph | Source::TwitterCard)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::OpenGraph => "og",
            Source::TwitterCard => "twitter",
            Source::Html => "html",
            Source::BodyText => "body",
        };
        f.write_str(name)
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "og" | "opengraph" | "open_graph" => Ok(Source::OpenGraph),
            "twitter" | "twitter_card" => Ok(Source::TwitterCard),
            "html" => Ok(Source::Html),
            "body" | "text" => Ok(Source::BodyText),
            other => Err(format!(
                "unknown metadata source `{other}` (expected og, twitter, html or body)"
            )),
        }
    }
}

/// Ordered list of metadata sources, highest priority first.
///
/// Sources missing from the list are ignored entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePriority {
    order: Vec<Source>,
}

impl SourcePriority {
    pub fn new(order: Vec<Source>) -> Self {
        Self { order }
    }

    /// Higher is stronger; `None` when the source is disabled.
    pub fn rank(&self, source: Source) -> Option<usize> {
        self.order
            .iter()
            .position(|s| *s == source)
            .map(|i| self.order.len() - i)
    }

    pub fn sources(&self) -> &[Source] {
        &self.order
    }
}

impl Default for SourcePriority {
    fn default() -> Self {
        Self::new(vec![
            Source::OpenGraph,
            Source::TwitterCard,
            Source::Html,
            Source::BodyText,
        ])
    }
}
