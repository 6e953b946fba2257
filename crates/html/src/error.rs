//! Fatal parse errors. This subset has no recovery grammar: the first error
//! aborts the parse and no partial tree is returned.

use crate::dom::DocumentError;
use crate::tokenizer::{Input, TokenizerState};
use css::StyleParseError;
use std::fmt;

/// The tokenizer hit an input symbol with no defined transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedMarkupError {
    pub state: TokenizerState,
    pub found: Input,
    /// Char offset of `found` (the input length for `Eof`).
    pub position: usize,
}

impl fmt::Display for MalformedMarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Input::Char(c) => write!(
                f,
                "malformed markup at char {}: unexpected {c:?} in {:?} state",
                self.position, self.state
            ),
            Input::Eof => write!(
                f,
                "malformed markup at char {}: unexpected end of input in {:?} state",
                self.position, self.state
            ),
        }
    }
}

impl std::error::Error for MalformedMarkupError {}

/// A closing tag did not match the innermost open element, or input ended
/// with elements still open (`found == None`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagMismatchError {
    /// Tag name of the open element (`#document` when nothing is open).
    pub expected: String,
    pub found: Option<String>,
}

impl fmt::Display for TagMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(found) => write!(
                f,
                "tag mismatch: </{found}> does not close <{}>",
                self.expected
            ),
            None => write!(f, "tag mismatch: <{}> is never closed", self.expected),
        }
    }
}

impl std::error::Error for TagMismatchError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    MalformedMarkup(MalformedMarkupError),
    TagMismatch(TagMismatchError),
    Style(StyleParseError),
    Document(DocumentError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedMarkup(err) => err.fmt(f),
            ParseError::TagMismatch(err) => err.fmt(f),
            ParseError::Style(err) => err.fmt(f),
            ParseError::Document(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::MalformedMarkup(err) => Some(err),
            ParseError::TagMismatch(err) => Some(err),
            ParseError::Style(err) => Some(err),
            ParseError::Document(err) => Some(err),
        }
    }
}

impl From<MalformedMarkupError> for ParseError {
    fn from(err: MalformedMarkupError) -> Self {
        ParseError::MalformedMarkup(err)
    }
}

impl From<TagMismatchError> for ParseError {
    fn from(err: TagMismatchError) -> Self {
        ParseError::TagMismatch(err)
    }
}

impl From<StyleParseError> for ParseError {
    fn from(err: StyleParseError) -> Self {
        ParseError::Style(err)
    }
}

impl From<DocumentError> for ParseError {
    fn from(err: DocumentError) -> Self {
        ParseError::Document(err)
    }
}
