//! Parse session: one tokenizer feeding one tree builder.
//!
//! All mutable state (tokenizer state, open elements, stylesheet) lives in the
//! session, so independent parses never share rules.

use crate::dom::Document;
use crate::error::ParseError;
use crate::tokenizer::{Input, Tokenizer, TokenizerState};
use crate::tree_builder::{CloseHook, TreeBuilder, TreeBuilderConfig};

pub struct Parser<H: CloseHook = ()> {
    tokenizer: Tokenizer,
    builder: TreeBuilder<H>,
}

impl Parser<()> {
    pub fn new(config: TreeBuilderConfig) -> Self {
        Self::with_hook(config, ())
    }
}

impl<H: CloseHook> Parser<H> {
    pub fn with_hook(config: TreeBuilderConfig, hook: H) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            builder: TreeBuilder::with_hook(config, hook),
        }
    }

    pub fn tree_builder(&self) -> &TreeBuilder<H> {
        &self.builder
    }

    /// Feeds more decoded text. May be called any number of times before
    /// [`Parser::finish`]; the result does not depend on how input is split.
    pub fn push_str(&mut self, text: &str) -> Result<(), ParseError> {
        for c in text.chars() {
            if self.tokenizer.state() == TokenizerState::EndOfInput {
                break;
            }
            self.push(Input::Char(c))?;
        }
        Ok(())
    }

    fn push(&mut self, input: Input) -> Result<(), ParseError> {
        if let Some(token) = self.tokenizer.feed(input)? {
            self.builder.handle(token)?;
        }
        Ok(())
    }

    /// Delivers end of input and returns the finished tree and hook.
    pub fn finish(mut self) -> Result<(Document, H), ParseError> {
        self.push(Input::Eof)?;
        self.builder.finish()?;
        Ok(self.builder.into_parts())
    }
}

/// Parses a complete document with the default configuration and no hook.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    parse_with_config(input, TreeBuilderConfig::default(), ()).map(|(document, ())| document)
}

pub fn parse_with_config<H: CloseHook>(
    input: &str,
    config: TreeBuilderConfig,
    hook: H,
) -> Result<(Document, H), ParseError> {
    let mut parser = Parser::with_hook(config, hook);
    parser.push_str(input)?;
    parser.finish()
}
