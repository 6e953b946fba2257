//! Character-at-a-time HTML tokenizer.
//!
//! The tokenizer is an explicit state machine: `feed` hands one input symbol
//! to the current state, which either consumes it (possibly emitting a token)
//! or asks for it to be reconsumed by another state.
//!
//! Invariants:
//! - At most one token is emitted per input symbol.
//! - `EndOfInput` is a real token, emitted exactly once, when `Input::Eof` is
//!   fed in the data state.
//! - No backtracking past the current symbol.
//!
//! Known limitations (intentional):
//! - No character references, comments, doctypes, CDATA or rawtext states.
//! - `<` followed by anything but `/` or an ASCII letter emits a `<` text
//!   token and stops the machine; the rest of the input is ignored.
use crate::error::MalformedMarkupError;
use crate::types::Token;
use states::{Transition, is_tag_whitespace};

mod states;

pub use states::{Input, TokenizerState};

#[derive(Debug)]
enum TagKind {
    Start,
    End,
}

#[derive(Debug)]
struct TagBuilder {
    kind: TagKind,
    name: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
}

impl TagBuilder {
    fn new(kind: TagKind) -> Self {
        Self {
            kind,
            name: String::new(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    fn into_token(self) -> Token {
        match self.kind {
            TagKind::Start => Token::StartTag {
                name: self.name,
                attributes: self.attributes,
                self_closing: self.self_closing,
            },
            TagKind::End => Token::EndTag(self.name),
        }
    }
}

#[derive(Debug)]
pub struct Tokenizer {
    state: TokenizerState,
    position: usize,
    current_tag: Option<TagBuilder>,
    current_attribute: Option<(String, String)>,
    eof_emitted: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: TokenizerState::Data,
            position: 0,
            current_tag: None,
            current_attribute: None,
            eof_emitted: false,
        }
    }

    pub fn state(&self) -> TokenizerState {
        self.state
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn eof_emitted(&self) -> bool {
        self.eof_emitted
    }

    /// Feeds one input symbol and returns the token it completed, if any.
    pub fn feed(&mut self, input: Input) -> Result<Option<Token>, MalformedMarkupError> {
        let mut emitted = None;
        let mut state = self.state;
        loop {
            match self.transition(state, input, &mut emitted) {
                Transition::Next(next) => {
                    state = next;
                    break;
                }
                Transition::Reconsume(next) => state = next,
                Transition::Malformed => {
                    return Err(MalformedMarkupError {
                        state,
                        found: input,
                        position: self.position,
                    });
                }
            }
        }
        self.state = state;
        if let Input::Char(_) = input {
            self.position += 1;
        }
        if let Some(token) = &emitted {
            if token.is_end_of_input() {
                self.eof_emitted = true;
            }
            log::trace!(target: "html.tokenizer", "emit token: {token:?}");
        }
        Ok(emitted)
    }

    fn emit(&mut self, slot: &mut Option<Token>, token: Token) {
        debug_assert!(slot.is_none(), "tokenizer emitted twice for one input");
        *slot = Some(token);
    }

    fn emit_current_tag(&mut self, slot: &mut Option<Token>) -> Transition {
        self.commit_attribute();
        match self.current_tag.take() {
            Some(tag) => {
                self.emit(slot, tag.into_token());
                Transition::Next(TokenizerState::Data)
            }
            None => Transition::Malformed,
        }
    }

    fn start_attribute(&mut self) {
        self.current_attribute = Some((String::new(), String::new()));
    }

    // Moves the pending attribute into the tag. A repeated name keeps its
    // original position and takes the new value.
    fn commit_attribute(&mut self) {
        let Some((name, value)) = self.current_attribute.take() else {
            return;
        };
        let Some(tag) = self.current_tag.as_mut() else {
            return;
        };
        match tag.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(existing) => existing.1 = value,
            None => tag.attributes.push((name, value)),
        }
    }

    fn push_tag_name(&mut self, c: char) {
        if let Some(tag) = self.current_tag.as_mut() {
            tag.name.push(c);
        }
    }

    fn push_attribute_name(&mut self, c: char) {
        if let Some((name, _)) = self.current_attribute.as_mut() {
            name.push(c);
        }
    }

    fn push_attribute_value(&mut self, c: char) {
        if let Some((_, value)) = self.current_attribute.as_mut() {
            value.push(c);
        }
    }

    fn transition(
        &mut self,
        state: TokenizerState,
        input: Input,
        emitted: &mut Option<Token>,
    ) -> Transition {
        use Input::{Char, Eof};
        use TokenizerState::*;

        match state {
            Data => match input {
                Char('<') => Transition::Next(TagOpen),
                Eof => {
                    self.emit(emitted, Token::EndOfInput);
                    Transition::Next(EndOfInput)
                }
                Char(c) => {
                    self.emit(emitted, Token::Text(c.to_string()));
                    Transition::Next(Data)
                }
            },
            TagOpen => match input {
                Char('/') => Transition::Next(EndTagOpen),
                Char(c) if c.is_ascii_alphabetic() => {
                    self.current_tag = Some(TagBuilder::new(TagKind::Start));
                    Transition::Reconsume(TagName)
                }
                _ => {
                    self.emit(emitted, Token::Text("<".to_string()));
                    Transition::Next(EndOfInput)
                }
            },
            EndTagOpen => match input {
                Char(c) if c.is_ascii_alphabetic() => {
                    self.current_tag = Some(TagBuilder::new(TagKind::End));
                    Transition::Reconsume(TagName)
                }
                _ => Transition::Malformed,
            },
            TagName => match input {
                Char(c) if is_tag_whitespace(c) => Transition::Next(BeforeAttributeName),
                Char('/') => Transition::Next(SelfClosingStartTag),
                Char('>') => self.emit_current_tag(emitted),
                Char(c) => {
                    self.push_tag_name(c);
                    Transition::Next(TagName)
                }
                Eof => Transition::Malformed,
            },
            BeforeAttributeName => match input {
                Char(c) if is_tag_whitespace(c) => Transition::Next(BeforeAttributeName),
                Char('/') | Char('>') | Eof => Transition::Reconsume(AfterAttributeName),
                Char('=') => Transition::Malformed,
                Char(_) => {
                    self.start_attribute();
                    Transition::Reconsume(AttributeName)
                }
            },
            AttributeName => match input {
                Char(c) if is_tag_whitespace(c) => Transition::Reconsume(AfterAttributeName),
                Char('/') | Char('>') | Eof => Transition::Reconsume(AfterAttributeName),
                Char('=') => Transition::Next(BeforeAttributeValue),
                Char('\0') | Char('"') | Char('\'') | Char('<') => Transition::Malformed,
                Char(c) => {
                    self.push_attribute_name(c);
                    Transition::Next(AttributeName)
                }
            },
            AfterAttributeName => match input {
                Char(c) if is_tag_whitespace(c) => Transition::Next(AfterAttributeName),
                Char('/') => {
                    self.commit_attribute();
                    Transition::Next(SelfClosingStartTag)
                }
                Char('=') => Transition::Next(BeforeAttributeValue),
                Char('>') => self.emit_current_tag(emitted),
                Eof => Transition::Malformed,
                Char(_) => {
                    self.commit_attribute();
                    self.start_attribute();
                    Transition::Reconsume(AttributeName)
                }
            },
            BeforeAttributeValue => match input {
                Char(c) if is_tag_whitespace(c) => Transition::Next(BeforeAttributeValue),
                Char('/') => Transition::Next(BeforeAttributeValue),
                Char('"') => Transition::Next(AttributeValueDoubleQuoted),
                Char('\'') => Transition::Next(AttributeValueSingleQuoted),
                Char('>') | Eof => Transition::Malformed,
                Char(_) => Transition::Reconsume(AttributeValueUnquoted),
            },
            AttributeValueDoubleQuoted => match input {
                Char('"') => {
                    self.commit_attribute();
                    Transition::Next(AfterAttributeValueQuoted)
                }
                Char('\0') | Eof => Transition::Malformed,
                Char(c) => {
                    self.push_attribute_value(c);
                    Transition::Next(AttributeValueDoubleQuoted)
                }
            },
            AttributeValueSingleQuoted => match input {
                Char('\'') => {
                    self.commit_attribute();
                    Transition::Next(AfterAttributeValueQuoted)
                }
                Char('\0') | Eof => Transition::Malformed,
                Char(c) => {
                    self.push_attribute_value(c);
                    Transition::Next(AttributeValueSingleQuoted)
                }
            },
            AttributeValueUnquoted => match input {
                Char(c) if is_tag_whitespace(c) => {
                    self.commit_attribute();
                    Transition::Next(BeforeAttributeName)
                }
                Char('/') => {
                    self.commit_attribute();
                    Transition::Next(SelfClosingStartTag)
                }
                Char('>') => self.emit_current_tag(emitted),
                Char('\0') | Char('"') | Char('\'') | Char('<') | Char('=') | Char('`') | Eof => {
                    Transition::Malformed
                }
                Char(c) => {
                    self.push_attribute_value(c);
                    Transition::Next(AttributeValueUnquoted)
                }
            },
            AfterAttributeValueQuoted => match input {
                Char(c) if is_tag_whitespace(c) => Transition::Next(BeforeAttributeName),
                Char('/') => Transition::Next(SelfClosingStartTag),
                Char('>') => self.emit_current_tag(emitted),
                _ => Transition::Malformed,
            },
            SelfClosingStartTag => match input {
                Char('>') => {
                    if let Some(tag) = self.current_tag.as_mut() {
                        tag.self_closing = true;
                    }
                    self.emit_current_tag(emitted)
                }
                _ => Transition::Malformed,
            },
            EndOfInput => Transition::Next(EndOfInput),
        }
    }
}

/// Lazy token stream over a complete input string, ending with
/// `Token::EndOfInput` (unless the machine stopped early or failed).
pub struct Tokens<'a> {
    chars: std::str::Chars<'a>,
    tokenizer: Tokenizer,
    done: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, MalformedMarkupError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let input = match self.chars.next() {
                Some(c) => Input::Char(c),
                None => {
                    self.done = true;
                    Input::Eof
                }
            };
            let fed = self.tokenizer.feed(input);
            if self.tokenizer.state() == TokenizerState::EndOfInput {
                self.done = true;
            }
            match fed {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens {
        chars: input.chars(),
        tokenizer: Tokenizer::new(),
        done: false,
    }
}
