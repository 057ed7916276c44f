use crate::markup::{Tag, Token};
use crate::metadata::model::{Field, MetadataRecord, normalize_whitespace};
use crate::metadata::priority::{Source, SourcePriority};

/// Shortest paragraph accepted as a fallback description, in characters.
const MIN_PARAGRAPH_CHARS: usize = 60;

/// Tags that implicitly end an open `<p>`.
const PARAGRAPH_CLOSERS: &[&str] = &[
    "p", "div", "section", "article", "aside", "header", "footer", "nav", "main", "ul", "ol",
    "table", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6", "body", "html",
];

/// Builds a [`MetadataRecord`] from a token stream in one pass.
pub fn aggregate<I>(tokens: I, priority: &SourcePriority) -> MetadataRecord
where
    I: IntoIterator<Item = Token>,
{
    let mut aggregator = Aggregator::new(priority);
    for token in tokens {
        aggregator.push(token);
    }
    aggregator.finish()
}

/// Text being collected for a field until its element closes.
enum Capture {
    Title(String),
    Paragraph(String),
}

pub struct Aggregator<'p> {
    priority: &'p SourcePriority,
    record: MetadataRecord,
    ranks: [usize; Field::ALL.len()],
    capture: Option<Capture>,
    paragraph_found: bool,
}

impl<'p> Aggregator<'p> {
    pub fn new(priority: &'p SourcePriority) -> Self {
        Self {
            priority,
            record: MetadataRecord::default(),
            ranks: [0; Field::ALL.len()],
            capture: None,
            paragraph_found: false,
        }
    }

    pub fn push(&mut self, token: Token) {
        match token {
            Token::StartTag(tag) => self.start_tag(&tag),
            Token::EndTag(name) => self.end_tag(&name),
            Token::Text(text) => match &mut self.capture {
                Some(Capture::Title(buf) | Capture::Paragraph(buf)) => buf.push_str(&text),
                None => {}
            },
        }
    }

    pub fn finish(mut self) -> MetadataRecord {
        self.close_capture();
        self.record
    }

    fn start_tag(&mut self, tag: &Tag) {
        if PARAGRAPH_CLOSERS.contains(&tag.name.as_str()) || tag.name == "title" {
            self.close_capture();
        }

        match tag.name.as_str() {
            "meta" => self.meta(tag),
            "title" => self.capture = Some(Capture::Title(String::new())),
            "img" => {
                if let Some(src) = tag.attr("src")
                    && !src.trim_start().starts_with("data:")
                {
                    self.offer(Field::Image, Source::Html, src);
                }
            }
            "p" if !self.paragraph_found => {
                self.capture = Some(Capture::Paragraph(String::new()));
            }
            "br" | "wbr" => {
                if let Some(Capture::Paragraph(buf)) = &mut self.capture {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        let closes = match self.capture {
            Some(Capture::Title(_)) => name == "title",
            Some(Capture::Paragraph(_)) => PARAGRAPH_CLOSERS.contains(&name),
            None => false,
        };
        if closes {
            self.close_capture();
        }
    }

    fn close_capture(&mut self) {
        match self.capture.take() {
            Some(Capture::Title(text)) => self.offer(Field::Title, Source::Html, &text),
            Some(Capture::Paragraph(text)) => {
                let text = normalize_whitespace(&text);
                if text.chars().count() >= MIN_PARAGRAPH_CHARS {
                    self.paragraph_found = true;
                    self.offer(Field::Description, Source::BodyText, &text);
                }
            }
            None => {}
        }
    }

    fn meta(&mut self, tag: &Tag) {
        let Some(content) = tag.attr("content") else {
            return;
        };

        for key in [tag.attr("property"), tag.attr("name")].into_iter().flatten() {
            if let Some((field, source)) = meta_field(&key.trim().to_ascii_lowercase()) {
                self.offer(field, source, content);
            }
        }
    }

    /// Stores `raw` unless a stronger source already supplied the field.
    fn offer(&mut self, field: Field, source: Source, raw: &str) {
        let Some(rank) = self.priority.rank(source) else {
            return;
        };

        let value = if field.is_url() {
            raw.trim().to_string()
        } else {
            normalize_whitespace(raw)
        };
        if value.is_empty() {
            return;
        }

        let current = self.ranks[field.index()];
        if rank > current || (rank == current && source.later_wins()) {
            self.ranks[field.index()] = rank;
            self.record.set(field, value);
        }
    }
}

fn meta_field(key: &str) -> Option<(Field, Source)> {
    let mapped = match key {
        "og:title" => (Field::Title, Source::OpenGraph),
        "og:description" => (Field::Description, Source::OpenGraph),
        "og:image" | "og:image:url" => (Field::Image, Source::OpenGraph),
        "og:url" => (Field::Url, Source::OpenGraph),
        "og:type" => (Field::Type, Source::OpenGraph),
        "og:site_name" => (Field::SiteName, Source::OpenGraph),
        "twitter:title" => (Field::Title, Source::TwitterCard),
        "twitter:description" => (Field::Description, Source::TwitterCard),
        "twitter:image" | "twitter:image:src" => (Field::Image, Source::TwitterCard),
        "description" => (Field::Description, Source::Html),
        _ => return None,
    };
    Some(mapped)
}
