use std::borrow::Cow;

/// A lexical event from [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag(Tag),
    /// Lowercased name of a closing tag.
    EndTag(String),
    /// Entity-decoded text between tags. A whitespace-only run between
    /// tags is reported as a single space.
    Text(String),
}

/// An opening tag with its attributes in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Tag {
    /// Value of the first attribute called `name` (lowercase).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Elements whose content is not scanned for tags.
#[derive(Debug, Clone, Copy)]
enum RawText {
    /// Content is reported as one `Text` token.
    Keep(&'static str),
    /// Content is dropped.
    Skip(&'static str),
}

impl RawText {
    fn for_element(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Keep("title")),
            "script" => Some(Self::Skip("script")),
            "style" => Some(Self::Skip("style")),
            _ => None,
        }
    }

    fn element(self) -> &'static str {
        match self {
            Self::Keep(name) | Self::Skip(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TagState {
    InTagName,
    BeforeAttributeName,
    InAttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    /// Carries the opening quote, `None` for unquoted values.
    InAttributeValue(Option<u8>),
}

/// Permissive single-pass HTML scanner.
///
/// No tree is built and nothing is validated: unclosed or misnested tags,
/// unknown elements and stray `<` characters are reported or passed through
/// as text. A tag cut off by the end of input is still emitted with the
/// attributes read so far.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    raw_text: Option<RawText>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
        }
    }

    fn slice_lower(&self, start: usize, end: usize) -> String {
        self.input[start..end].to_ascii_lowercase()
    }

    fn slice_decoded(&self, start: usize, end: usize) -> String {
        decode_entities(&self.input[start..end]).into_owned()
    }

    fn start_tag(&mut self) -> Token {
        let bytes = self.input.as_bytes();
        let mut tag = Tag::default();
        let mut state = TagState::InTagName;
        let mut attr_name = String::new();
        let mut i = self.pos + 1;
        let mut mark = i;

        let closed = loop {
            let Some(&b) = bytes.get(i) else {
                break false;
            };

            match state {
                TagState::InTagName => match b {
                    b'>' => {
                        tag.name = self.slice_lower(mark, i);
                        break true;
                    }
                    b'/' => {
                        tag.name = self.slice_lower(mark, i);
                        state = TagState::BeforeAttributeName;
                    }
                    _ if b.is_ascii_whitespace() => {
                        tag.name = self.slice_lower(mark, i);
                        state = TagState::BeforeAttributeName;
                    }
                    _ => {}
                },
                TagState::BeforeAttributeName => match b {
                    b'>' => break true,
                    b'/' => {}
                    _ if b.is_ascii_whitespace() => {}
                    _ => {
                        mark = i;
                        state = TagState::InAttributeName;
                    }
                },
                TagState::InAttributeName => match b {
                    b'=' => {
                        attr_name = self.slice_lower(mark, i);
                        state = TagState::BeforeAttributeValue;
                    }
                    b'>' => {
                        tag.attributes.push((self.slice_lower(mark, i), String::new()));
                        break true;
                    }
                    b'/' => {
                        tag.attributes.push((self.slice_lower(mark, i), String::new()));
                        state = TagState::BeforeAttributeName;
                    }
                    _ if b.is_ascii_whitespace() => {
                        attr_name = self.slice_lower(mark, i);
                        state = TagState::AfterAttributeName;
                    }
                    _ => {}
                },
                TagState::AfterAttributeName => match b {
                    b'=' => state = TagState::BeforeAttributeValue,
                    b'>' => {
                        tag.attributes.push((std::mem::take(&mut attr_name), String::new()));
                        break true;
                    }
                    b'/' => {
                        tag.attributes.push((std::mem::take(&mut attr_name), String::new()));
                        state = TagState::BeforeAttributeName;
                    }
                    _ if b.is_ascii_whitespace() => {}
                    _ => {
                        tag.attributes.push((std::mem::take(&mut attr_name), String::new()));
                        mark = i;
                        state = TagState::InAttributeName;
                    }
                },
                TagState::BeforeAttributeValue => match b {
                    b'"' | b'\'' => {
                        mark = i + 1;
                        state = TagState::InAttributeValue(Some(b));
                    }
                    b'>' => {
                        tag.attributes.push((std::mem::take(&mut attr_name), String::new()));
                        break true;
                    }
                    _ if b.is_ascii_whitespace() => {}
                    _ => {
                        mark = i;
                        state = TagState::InAttributeValue(None);
                    }
                },
                TagState::InAttributeValue(Some(quote)) => {
                    if b == quote {
                        let value = self.slice_decoded(mark, i);
                        tag.attributes.push((std::mem::take(&mut attr_name), value));
                        state = TagState::BeforeAttributeName;
                    }
                }
                TagState::InAttributeValue(None) => {
                    if b == b'>' || b.is_ascii_whitespace() {
                        let value = self.slice_decoded(mark, i);
                        tag.attributes.push((std::mem::take(&mut attr_name), value));
                        if b == b'>' {
                            break true;
                        }
                        state = TagState::BeforeAttributeName;
                    }
                }
            }
            i += 1;
        };

        if closed {
            self.pos = i + 1;
        } else {
            let end = self.input.len();
            match state {
                TagState::InTagName => tag.name = self.slice_lower(mark, end),
                TagState::BeforeAttributeName => {}
                TagState::InAttributeName => {
                    tag.attributes.push((self.slice_lower(mark, end), String::new()));
                }
                TagState::AfterAttributeName | TagState::BeforeAttributeValue => {
                    tag.attributes.push((attr_name, String::new()));
                }
                TagState::InAttributeValue(_) => {
                    let value = self.slice_decoded(mark, end);
                    tag.attributes.push((attr_name, value));
                }
            }
            self.pos = end;
        }

        self.raw_text = RawText::for_element(&tag.name);
        Token::StartTag(tag)
    }

    fn end_tag(&mut self) -> Option<Token> {
        let rest = &self.input[self.pos..];
        let close = rest.find('>').map_or(rest.len(), |i| i + 1);

        let name_len = rest.as_bytes()[2..]
            .iter()
            .position(|b| b.is_ascii_whitespace() || *b == b'/' || *b == b'>')
            .unwrap_or(rest.len() - 2);
        let starts_with_letter = rest.as_bytes().get(2).is_some_and(u8::is_ascii_alphabetic);
        let name = rest[2..2 + name_len].to_ascii_lowercase();

        self.pos += close;
        starts_with_letter.then_some(Token::EndTag(name))
    }

    fn skip_declaration(&mut self) {
        let rest = &self.input[self.pos..];
        let skipped = if rest.starts_with("<!--") {
            rest[4..].find("-->").map_or(rest.len(), |i| 4 + i + 3)
        } else {
            rest.find('>').map_or(rest.len(), |i| i + 1)
        };
        self.pos += skipped;
    }

    fn text(&mut self) -> Option<Token> {
        let rest = &self.input[self.pos..];
        // The first character may be a literal `<`
        let first = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first..].find('<').map_or(rest.len(), |i| i + first);
        let content = &rest[..end];
        self.pos += end;

        if content.trim().is_empty() {
            return Some(Token::Text(" ".to_string()));
        }
        Some(Token::Text(decode_entities(content).into_owned()))
    }

    fn raw_text(&mut self, kind: RawText) -> Option<Token> {
        let rest = &self.input[self.pos..];
        let end = find_end_tag(rest, kind.element()).unwrap_or(rest.len());
        let content = &rest[..end];
        self.pos += end;

        match kind {
            RawText::Keep(_) if !content.trim().is_empty() => {
                Some(Token::Text(decode_entities(content).into_owned()))
            }
            _ => None,
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(kind) = self.raw_text.take() {
                if let Some(token) = self.raw_text(kind) {
                    return Some(token);
                }
                continue;
            }

            let rest = &self.input[self.pos..];
            if rest.is_empty() {
                return None;
            }

            let bytes = rest.as_bytes();
            if bytes[0] == b'<' {
                match bytes.get(1) {
                    Some(b) if b.is_ascii_alphabetic() => return Some(self.start_tag()),
                    Some(b'/') => {
                        if let Some(token) = self.end_tag() {
                            return Some(token);
                        }
                        continue;
                    }
                    Some(b'!' | b'?') => {
                        self.skip_declaration();
                        continue;
                    }
                    _ => {}
                }
            }

            if let Some(token) = self.text() {
                return Some(token);
            }
        }
    }
}

/// Byte offset of the first `</name` (ASCII case-insensitive) that ends an element.
fn find_end_tag(haystack: &str, name: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    haystack.match_indices("</").map(|(i, _)| i).find(|&i| {
        let after = &bytes[i + 2..];
        after.len() >= name.len()
            && after[..name.len()].eq_ignore_ascii_case(name.as_bytes())
            && after
                .get(name.len())
                .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
    })
}

pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(raw)
}
