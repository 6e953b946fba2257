//! Tokenizer state machine definitions.
//!
//! State names follow the HTML tokenization chapter; only the states needed
//! for text, tags and attributes exist. `EndOfInput` is terminal.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenizerState {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    EndOfInput,
}

/// One input symbol: a character, or the end-of-input sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Eof,
}

/// Outcome of one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Consume the symbol and move to the state.
    Next(TokenizerState),
    /// Hand the same symbol to the state.
    Reconsume(TokenizerState),
    /// No transition is defined for this symbol.
    Malformed,
}

// tab, LF, FF, space
pub(crate) fn is_tag_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{000C}' | ' ')
}
