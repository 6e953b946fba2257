//! HTML and CSS in, a styled element tree with flex line classification out.
//!
//! The pipeline is one pass over the input: the tokenizer feeds the tree
//! builder, `<style>` blocks register rules as they close, every start tag
//! gets its cascaded style, and every closed element goes through the flex
//! pass.
use std::collections::BTreeMap;

pub use css;
pub use html;
pub use layout;

pub use html::{Document, NodeId, ParseError, TreeBuilderConfig};
pub use layout::{FlexLayout, FlexLayoutHook};

/// Result of one parse.
#[derive(Debug)]
pub struct Page {
    pub document: Document,
    /// Flex containers by element id.
    pub flex_layouts: BTreeMap<NodeId, FlexLayout>,
}

impl Page {
    pub fn flex_layout(&self, id: NodeId) -> Option<&FlexLayout> {
        self.flex_layouts.get(&id)
    }
}

pub fn parse_document(input: &str) -> Result<Page, ParseError> {
    parse_document_with_config(input, TreeBuilderConfig::default())
}

pub fn parse_document_with_config(
    input: &str,
    config: TreeBuilderConfig,
) -> Result<Page, ParseError> {
    let (document, hook) = html::parse_with_config(input, config, FlexLayoutHook::new())?;
    let flex_layouts = hook.into_layouts();
    log::debug!(
        target: "mini_engine",
        "parsed {} nodes, {} flex containers",
        document.len(),
        flex_layouts.len()
    );
    Ok(Page {
        document,
        flex_layouts,
    })
}

/// Entry point for a completed response body. Bodies whose content type is
/// not HTML are not parsed.
pub fn parse_response_body(
    content_type: &Option<String>,
    body: &str,
) -> Result<Option<Page>, ParseError> {
    if !html::is_html(content_type) {
        log::debug!(
            target: "mini_engine",
            "skipping non-html body: {:?}",
            content_type.as_deref()
        );
        return Ok(None);
    }
    parse_document(body).map(Some)
}
