//! Flex line classification.
//!
//! Given a closed `display: flex` element, resolve the styles involved, pick
//! the main and cross axes, and group the element children into flex lines
//! while tracking the remaining space on each line. Items are not
//! positioned.
use css::{ResolvedStyle, StyleValue};
use html::{Document, NodeId};

/// A size property: which dimension an axis measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub fn property(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisMapping {
    pub main_size: Axis,
    pub main_start: Edge,
    pub main_end: Edge,
    pub main_sign: i8,
    pub main_base: f64,
    pub cross_size: Axis,
    pub cross_start: Edge,
    pub cross_end: Edge,
    pub cross_sign: i8,
    pub cross_base: f64,
}

impl AxisMapping {
    // input: "row" | "row-reverse" | "column" | "column-reverse" | anything else (→ row)
    // output: axis mapping before wrap-reverse adjustment
    fn for_direction(direction: &str, style: &ResolvedStyle) -> Self {
        let (main_size, main_start, main_end, main_sign, main_base) = match direction {
            "row-reverse" => (
                Axis::Width,
                Edge::Right,
                Edge::Left,
                -1,
                style.number("width").unwrap_or(0.0),
            ),
            "column" => (Axis::Height, Edge::Top, Edge::Bottom, 1, 0.0),
            "column-reverse" => (
                Axis::Height,
                Edge::Bottom,
                Edge::Top,
                -1,
                style.number("height").unwrap_or(0.0),
            ),
            _ => (Axis::Width, Edge::Left, Edge::Right, 1, 0.0),
        };
        let (cross_size, cross_start, cross_end) = match main_size {
            Axis::Width => (Axis::Height, Edge::Top, Edge::Bottom),
            Axis::Height => (Axis::Width, Edge::Left, Edge::Right),
        };
        Self {
            main_size,
            main_start,
            main_end,
            main_sign,
            main_base,
            cross_size,
            cross_start,
            cross_end,
            cross_sign: 1,
            cross_base: 0.0,
        }
    }

    fn reverse_cross(&mut self) {
        std::mem::swap(&mut self.cross_start, &mut self.cross_end);
        self.cross_sign = -1;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlexLine {
    pub items: Vec<NodeId>,
    /// Main-axis space left after the items on this line.
    pub main_space: f64,
    /// Largest numeric cross size among the items on this line.
    pub cross_space: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlexLayout {
    pub mapping: AxisMapping,
    pub is_auto_main_size: bool,
    pub lines: Vec<FlexLine>,
}

fn is_unset_or_auto(style: &ResolvedStyle, property: &str) -> bool {
    style.is_absent(property) || style.keyword(property) == Some("auto")
}

fn keyword(value: &str) -> StyleValue {
    StyleValue::Keyword(value.to_string())
}

// Copies the element's computed style into its resolved style. Returns false
// when there is no computed style to resolve.
fn resolve_element_style(document: &mut Document, id: NodeId) -> bool {
    let Some(element) = document.element_mut(id) else {
        return false;
    };
    let Some(computed) = element.computed_style.as_ref() else {
        return false;
    };
    let style = element.style.get_or_insert_with(ResolvedStyle::new);
    css::resolve_style(computed, style);
    true
}

fn apply_container_defaults(style: &mut ResolvedStyle) {
    for size in ["width", "height"] {
        if matches!(style.keyword(size), Some("auto" | "")) {
            style.set(size, StyleValue::Unset);
        }
    }
    if is_unset_or_auto(style, "flex-direction") {
        style.set("flex-direction", keyword("row"));
    }
    // An unset align-items writes into flex-direction, and an unset
    // align-content writes into flex-wrap.
    if is_unset_or_auto(style, "align-items") {
        style.set("flex-direction", keyword("stretch"));
    }
    if is_unset_or_auto(style, "justify-content") {
        style.set("justify-content", keyword("flex-start"));
    }
    if is_unset_or_auto(style, "flex-wrap") {
        style.set("flex-wrap", keyword("nowrap"));
    }
    if is_unset_or_auto(style, "align-content") {
        style.set("flex-wrap", keyword("stretch"));
    }
}

fn order(document: &Document, item: NodeId) -> f64 {
    document
        .element(item)
        .and_then(|element| element.style.as_ref())
        .and_then(|style| style.number("order"))
        .unwrap_or(0.0)
}

/// Runs the flex pass on `id`.
///
/// Returns `None` when the element has no computed style or is not a flex
/// container. In the second case the resolved style is still written.
pub fn layout(document: &mut Document, id: NodeId) -> Option<FlexLayout> {
    if !resolve_element_style(document, id) {
        return None;
    }
    let is_flex = document
        .element(id)
        .and_then(|element| element.style.as_ref())
        .is_some_and(|style| style.keyword("display") == Some("flex"));
    if !is_flex {
        return None;
    }

    let children = document.element_children(id);
    for &item in &children {
        resolve_element_style(document, item);
    }
    let ordered: &Document = document;
    let mut items: Vec<(f64, NodeId)> = children
        .into_iter()
        .map(|item| (order(ordered, item), item))
        .collect();
    items.sort_by(|a, b| a.0.total_cmp(&b.0));

    let container = document.element_mut(id)?.style.as_mut()?;
    apply_container_defaults(container);

    let direction = container.keyword("flex-direction").unwrap_or("row").to_string();
    let mut mapping = AxisMapping::for_direction(&direction, container);
    let wrap = container.keyword("flex-wrap").unwrap_or("nowrap").to_string();
    if wrap == "wrap-reverse" {
        mapping.reverse_cross();
    }

    let main_property = mapping.main_size.property();
    let cross_property = mapping.cross_size.property();
    let is_auto_main_size = container.number(main_property).is_none_or(|n| n == 0.0);
    if is_auto_main_size {
        container.set(main_property, StyleValue::Number(0.0));
    }
    let container_main = container.number(main_property).unwrap_or(0.0);

    log::trace!(
        target: "layout.flex",
        "container {id:?}: direction={direction} wrap={wrap} main={main_property} auto={is_auto_main_size} items={}",
        items.len()
    );

    let mut lines = Vec::new();
    let mut line = FlexLine {
        main_space: container_main,
        ..FlexLine::default()
    };

    for (_, item) in items {
        let Some(item_style) = document
            .element_mut(item)
            .map(|element| element.style.get_or_insert_with(ResolvedStyle::new))
        else {
            continue;
        };
        if item_style.get(main_property) == Some(&StyleValue::Unset) {
            item_style.set(main_property, StyleValue::Number(0.0));
        }
        let mut item_main = item_style.number(main_property).unwrap_or(0.0);
        let item_cross = item_style.number(cross_property);

        if item_style.get("flex").is_some_and(StyleValue::is_present) {
            line.items.push(item);
        } else if wrap == "nowrap" && is_auto_main_size {
            line.main_space -= item_main;
            if let Some(cross) = item_cross {
                line.cross_space = line.cross_space.max(cross);
            }
            line.items.push(item);
        } else {
            if item_main > container_main {
                item_main = container_main;
                item_style.set(main_property, StyleValue::Number(container_main));
            }
            if line.main_space < item_main {
                log::trace!(
                    target: "layout.flex",
                    "line closed: items={} main_space={} cross_space={}",
                    line.items.len(),
                    line.main_space,
                    line.cross_space
                );
                let full = std::mem::replace(
                    &mut line,
                    FlexLine {
                        items: vec![item],
                        main_space: container_main,
                        cross_space: 0.0,
                    },
                );
                lines.push(full);
            } else {
                line.items.push(item);
            }
            if let Some(cross) = item_cross {
                line.cross_space = line.cross_space.max(cross);
            }
            line.main_space -= item_main;
        }
    }
    if !line.items.is_empty() {
        lines.push(line);
    }

    Some(FlexLayout {
        mapping,
        is_auto_main_size,
        lines,
    })
}

#[cfg(test)]
mod tests;
