pub mod content_type;
pub mod dom;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod dom_snapshot;
pub mod error;
pub mod parser;
pub mod perf_fixtures;
pub mod tokenizer;
pub mod tree_builder;

mod types;

pub use crate::content_type::is_html;
pub use crate::dom::{
    DOCUMENT_TAG_NAME, Document, DocumentError, ElementData, Node, NodeId, NodeKind,
};
pub use crate::error::{MalformedMarkupError, ParseError, TagMismatchError};
pub use crate::parser::{Parser, parse, parse_with_config};
pub use crate::tokenizer::{Input, Tokenizer, TokenizerState, Tokens, tokenize};
pub use crate::tree_builder::{CloseHook, TreeBuilder, TreeBuilderConfig};
pub use crate::types::Token;
