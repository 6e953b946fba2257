//! Stylesheet syntax: just enough of the CSS grammar to feed the cascade.
//!
//! Supported:
//! - qualified rules `selector, selector { name: value; ... }`,
//! - `/* ... */` comments anywhere,
//! - at-rules (`@import ...;`, `@media ... { ... }`), which are skipped.
//!
//! Anything else that cannot be split into rules is a [`StyleParseError`]; no
//! partial stylesheet is returned.
use std::fmt;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Set of selectors and declarations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Selector strings with inner whitespace collapsed to single spaces.
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

/// Ordered rule set. Rules keep document order across [`Stylesheet::append`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends `other`'s rules after the rules already registered.
    pub fn append(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleParseErrorKind {
    UnterminatedComment,
    /// A selector with no `{` after it.
    MissingBlock,
    /// A `{` (or at-rule block) with no matching `}`.
    UnclosedBlock,
    UnexpectedCloseBrace,
    EmptySelector,
    MissingColon,
    EmptyProperty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleParseError {
    pub kind: StyleParseErrorKind,
    /// Byte offset into the stylesheet text.
    pub offset: usize,
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            StyleParseErrorKind::UnterminatedComment => "unterminated comment",
            StyleParseErrorKind::MissingBlock => "missing '{'",
            StyleParseErrorKind::UnclosedBlock => "missing '}'",
            StyleParseErrorKind::UnexpectedCloseBrace => "unexpected '}'",
            StyleParseErrorKind::EmptySelector => "empty selector",
            StyleParseErrorKind::MissingColon => "property missing ':'",
            StyleParseErrorKind::EmptyProperty => "empty property name",
        };
        write!(f, "stylesheet parse error at byte {}: {what}", self.offset)
    }
}

impl std::error::Error for StyleParseError {}

fn error(kind: StyleParseErrorKind, offset: usize) -> StyleParseError {
    StyleParseError { kind, offset }
}

// Comments are blanked out byte-for-byte so offsets into the result are
// offsets into the original text. Comment delimiters are ASCII, so blanking
// whole comments keeps the buffer valid UTF-8.
fn blank_comments(input: &str) -> Result<String, StyleParseError> {
    let mut bytes = input.as_bytes().to_vec();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'/' && bytes[i + 1] == b'*' {
            let start = i;
            let Some(rel) = input[i + 2..].find("*/") else {
                return Err(error(StyleParseErrorKind::UnterminatedComment, start));
            };
            let end = i + 2 + rel + 2;
            bytes[start..end].fill(b' ');
            i = end;
        } else {
            i += 1;
        }
    }
    String::from_utf8(bytes).map_err(|_| error(StyleParseErrorKind::UnterminatedComment, 0))
}

// Returns the offset just past the at-rule starting at `start`.
fn skip_at_rule(text: &str, start: usize) -> Result<usize, StyleParseError> {
    let bytes = text.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b';' => return Ok(i + 1),
            b'{' => {
                let open = i;
                let mut depth = 0usize;
                while i < bytes.len() {
                    match bytes[i] {
                        b'{' => depth += 1,
                        b'}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Ok(i + 1);
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                return Err(error(StyleParseErrorKind::UnclosedBlock, open));
            }
            b'}' => return Err(error(StyleParseErrorKind::UnexpectedCloseBrace, i)),
            _ => i += 1,
        }
    }
    // `@charset "x"` at the very end without a semicolon.
    Ok(bytes.len())
}

fn parse_selectors(text: &str, offset: usize) -> Result<Vec<String>, StyleParseError> {
    let mut selectors = Vec::new();
    let mut part_offset = offset;
    for part in text.split(',') {
        let normalized = part.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            return Err(error(StyleParseErrorKind::EmptySelector, part_offset));
        }
        selectors.push(normalized);
        part_offset += part.len() + 1;
    }
    Ok(selectors)
}

fn parse_declarations_at(input: &str, offset: usize) -> Result<Vec<Declaration>, StyleParseError> {
    let mut declarations = Vec::new();
    let mut pair_offset = offset;
    for pair in input.split(';') {
        let this_offset = pair_offset;
        pair_offset += pair.len() + 1;
        if pair.trim().is_empty() {
            continue;
        }
        let Some((n, v)) = pair.split_once(':') else {
            return Err(error(StyleParseErrorKind::MissingColon, this_offset));
        };
        let name = n.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(error(StyleParseErrorKind::EmptyProperty, this_offset));
        }
        declarations.push(Declaration {
            name,
            value: v.trim().to_string(),
        });
    }
    Ok(declarations)
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Result<Vec<Declaration>, StyleParseError> {
    parse_declarations_at(input, 0)
}

// input: "div, #id { color: red; } .class { font-size: 12px; }"
// output: Stylesheet { rules: vec![Rule{ selectors: ..., declarations: ...}, ...] }
pub fn parse_stylesheet(input: &str) -> Result<Stylesheet, StyleParseError> {
    let text = blank_comments(input)?;
    let bytes = text.as_bytes();
    let mut rules = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        match bytes[i] {
            b'@' => {
                i = skip_at_rule(&text, i)?;
                continue;
            }
            b'}' => return Err(error(StyleParseErrorKind::UnexpectedCloseBrace, i)),
            _ => {}
        }

        let selector_start = i;
        let Some(rel) = text[i..].find(['{', '}']) else {
            return Err(error(StyleParseErrorKind::MissingBlock, selector_start));
        };
        let open = i + rel;
        if bytes[open] == b'}' {
            return Err(error(StyleParseErrorKind::UnexpectedCloseBrace, open));
        }
        let selectors = parse_selectors(&text[selector_start..open], selector_start)?;

        let body_start = open + 1;
        let Some(rel) = text[body_start..].find('}') else {
            return Err(error(StyleParseErrorKind::UnclosedBlock, open));
        };
        let close = body_start + rel;
        let declarations = parse_declarations_at(&text[body_start..close], body_start)?;

        rules.push(Rule {
            selectors,
            declarations,
        });
        i = close + 1;
    }

    log::trace!(target: "css.syntax", "parsed {} rules", rules.len());
    Ok(Stylesheet { rules })
}
