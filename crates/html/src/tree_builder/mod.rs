//! Stack-based tree builder.
//!
//! Consumes tokens and grows the [`Document`]. The builder owns all
//! tree-construction state: the stack of open elements (the document root is
//! always at the bottom and is never popped), the current text node, and the
//! stylesheet registered so far.
//!
//! Style is computed once per element, when its start tag arrives, against
//! the rules seen up to that point. A `<style>` block therefore only affects
//! elements opened after it closes, and never the element that contains it.

use crate::dom::{Document, ElementData, NodeId, NodeKind};
use crate::error::{ParseError, TagMismatchError};
use crate::types::Token;
use css::Stylesheet;

#[derive(Clone, Debug)]
pub struct TreeBuilderConfig {
    /// Element whose text content is parsed as CSS when it closes.
    pub stylesheet_tag: String,
    /// Merge consecutive text tokens under one open element into one node.
    pub coalesce_text: bool,
}

impl Default for TreeBuilderConfig {
    fn default() -> Self {
        Self {
            stylesheet_tag: "style".to_string(),
            coalesce_text: true,
        }
    }
}

/// Called for every element right before it is popped off the open stack.
///
/// The element's children are complete at this point and its style has been
/// computed; this is where the layout pass plugs in.
pub trait CloseHook {
    fn element_closed(&mut self, document: &mut Document, id: NodeId);
}

impl CloseHook for () {
    fn element_closed(&mut self, _document: &mut Document, _id: NodeId) {}
}

impl<H: CloseHook + ?Sized> CloseHook for &mut H {
    fn element_closed(&mut self, document: &mut Document, id: NodeId) {
        (**self).element_closed(document, id);
    }
}

pub struct TreeBuilder<H: CloseHook = ()> {
    config: TreeBuilderConfig,
    document: Document,
    open_elements: Vec<NodeId>,
    current_text: Option<NodeId>,
    stylesheet: Stylesheet,
    hook: H,
}

impl TreeBuilder<()> {
    pub fn new(config: TreeBuilderConfig) -> Self {
        Self::with_hook(config, ())
    }
}

impl<H: CloseHook> TreeBuilder<H> {
    pub fn with_hook(config: TreeBuilderConfig, hook: H) -> Self {
        let document = Document::new();
        let root = document.root();
        Self {
            config,
            document,
            open_elements: vec![root],
            current_text: None,
            stylesheet: Stylesheet::new(),
            hook,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Open elements from the document root to the innermost element.
    pub fn open_elements(&self) -> &[NodeId] {
        &self.open_elements
    }

    fn current_node(&self) -> NodeId {
        // The root is never popped, so the stack is never empty.
        self.open_elements
            .last()
            .copied()
            .unwrap_or_else(|| self.document.root())
    }

    pub fn handle(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.start_tag(name, attributes, self_closing),
            Token::EndTag(name) => self.end_tag(&name),
            Token::Text(text) => self.text(&text),
            Token::EndOfInput => {
                self.current_text = None;
                self.check_all_closed()?;
                Ok(())
            }
        }
    }

    fn start_tag(
        &mut self,
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    ) -> Result<(), ParseError> {
        let mut element = ElementData::new(name, attributes);
        let ancestors: Vec<&ElementData> = self
            .open_elements
            .iter()
            .rev()
            .filter_map(|&id| self.document.element(id))
            .collect();
        element.computed_style = css::compute_style(&element, &ancestors, &self.stylesheet);

        log::trace!(
            target: "html.tree_builder",
            "open <{}> depth={} styled={}",
            element.name,
            self.open_elements.len(),
            element.computed_style.is_some()
        );

        let parent = self.current_node();
        let id = self
            .document
            .append_child(parent, NodeKind::Element(element))?;
        if !self_closing {
            self.open_elements.push(id);
        }
        self.current_text = None;
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Result<(), ParseError> {
        let top = self.current_node();
        let matches_top = self
            .document
            .element(top)
            .is_some_and(|element| element.name == name);
        if !matches_top {
            return Err(TagMismatchError {
                expected: self.document[top].tag_name().to_string(),
                found: Some(name.to_string()),
            }
            .into());
        }

        if name == self.config.stylesheet_tag {
            self.register_stylesheet(top)?;
        }
        self.hook.element_closed(&mut self.document, top);
        log::trace!(target: "html.tree_builder", "close <{name}>");

        self.open_elements.pop();
        self.current_text = None;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), ParseError> {
        if self.config.coalesce_text
            && let Some(current) = self.current_text
        {
            self.document.push_text(current, text);
            return Ok(());
        }
        let parent = self.current_node();
        let id = self
            .document
            .append_child(parent, NodeKind::Text(text.to_string()))?;
        self.current_text = Some(id);
        Ok(())
    }

    // Joins the direct text children, which may be split into many nodes
    // when coalescing is off. An empty block registers nothing.
    fn register_stylesheet(&mut self, id: NodeId) -> Result<(), ParseError> {
        let css_text: String = self
            .document
            .children(id)
            .iter()
            .filter_map(|&child| self.document[child].text())
            .collect();
        if css_text.is_empty() {
            return Ok(());
        }
        let sheet = css::parse_stylesheet(&css_text)?;
        log::debug!(
            target: "html.tree_builder",
            "registered stylesheet: {} rules ({} total)",
            sheet.len(),
            self.stylesheet.len() + sheet.len()
        );
        self.stylesheet.append(sheet);
        Ok(())
    }

    fn check_all_closed(&self) -> Result<(), TagMismatchError> {
        if self.open_elements.len() > 1 {
            let top = self.current_node();
            return Err(TagMismatchError {
                expected: self.document[top].tag_name().to_string(),
                found: None,
            });
        }
        Ok(())
    }

    /// Ends the parse. Fails if elements are still open, whether or not an
    /// `EndOfInput` token was seen.
    pub fn finish(&mut self) -> Result<(), TagMismatchError> {
        self.current_text = None;
        self.check_all_closed()
    }

    pub fn into_parts(self) -> (Document, H) {
        (self.document, self.hook)
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}
