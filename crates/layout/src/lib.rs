//! Layout pass over the parsed document.
//!
//! Only the flex subset exists: a closed flex container gets its children
//! grouped into lines. Positions and boxes are out of reach of this crate.
mod flex;

use html::{CloseHook, Document, NodeId};
use std::collections::BTreeMap;

pub use flex::{Axis, AxisMapping, Edge, FlexLayout, FlexLine, layout};

/// Close hook that runs [`layout`] on every closed element and keeps the
/// flex results by element id.
#[derive(Debug, Default)]
pub struct FlexLayoutHook {
    layouts: BTreeMap<NodeId, FlexLayout>,
}

impl FlexLayoutHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layouts(&self) -> &BTreeMap<NodeId, FlexLayout> {
        &self.layouts
    }

    pub fn into_layouts(self) -> BTreeMap<NodeId, FlexLayout> {
        self.layouts
    }
}

impl CloseHook for FlexLayoutHook {
    fn element_closed(&mut self, document: &mut Document, id: NodeId) {
        if let Some(flex) = layout(document, id) {
            self.layouts.insert(id, flex);
        }
    }
}
