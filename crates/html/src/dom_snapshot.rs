use crate::dom::{Document, NodeId, NodeKind};
use std::fmt::{self, Write};

/// Deterministic line-per-node rendering of a [`Document`] for fixture tests.
/// Not a public stable format.
///
/// Equivalence rules:
/// - Node kinds and element names must match.
/// - Attribute order is significant; names and values must match.
/// - Text nodes must match exactly.
/// - Node ids and computed style are only compared when enabled in options.
#[derive(Clone, Copy, Debug)]
pub struct DomSnapshotOptions {
    pub ignore_ids: bool,
    pub include_computed_style: bool,
}

impl Default for DomSnapshotOptions {
    fn default() -> Self {
        Self {
            ignore_ids: true,
            include_computed_style: false,
        }
    }
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(document: &Document, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(document, document.root(), &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// First differing line between an expected rendering and a document.
#[derive(Debug)]
pub struct DomMismatch {
    line: usize,
    expected: Option<String>,
    actual: Option<String>,
    actual_tree: String,
}

impl fmt::Display for DomMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DOM mismatch at line {}", self.line + 1)?;
        writeln!(f, "expected: {}", self.expected.as_deref().unwrap_or("<end>"))?;
        writeln!(f, "actual:   {}", self.actual.as_deref().unwrap_or("<end>"))?;
        writeln!(f, "actual tree:\n{}", self.actual_tree)
    }
}

impl std::error::Error for DomMismatch {}

pub fn compare_dom(
    expected: &[&str],
    actual: &Document,
    options: DomSnapshotOptions,
) -> Result<(), Box<DomMismatch>> {
    let snapshot = DomSnapshot::new(actual, options);
    let actual_lines = snapshot.as_lines();
    let len = expected.len().max(actual_lines.len());
    for line in 0..len {
        let exp = expected.get(line).copied();
        let act = actual_lines.get(line).map(String::as_str);
        if exp != act {
            return Err(Box::new(DomMismatch {
                line,
                expected: exp.map(str::to_string),
                actual: act.map(str::to_string),
                actual_tree: snapshot.render(),
            }));
        }
    }
    Ok(())
}

pub fn assert_dom_eq(expected: &[&str], actual: &Document, options: DomSnapshotOptions) {
    if let Err(mismatch) = compare_dom(expected, actual, options) {
        panic!("{mismatch}");
    }
}

fn walk_snapshot(
    document: &Document,
    id: NodeId,
    options: &DomSnapshotOptions,
    depth: usize,
    out: &mut Vec<String>,
) {
    const INDENT_STEP: usize = 2;
    let mut line = " ".repeat(depth * INDENT_STEP);
    write_node_line(&mut line, document, id, options);
    out.push(line);
    for &child in document.children(id) {
        walk_snapshot(document, child, options, depth + 1, out);
    }
}

fn write_node_line(out: &mut String, document: &Document, id: NodeId, options: &DomSnapshotOptions) {
    match &document[id].kind {
        NodeKind::Document => out.push_str("#document"),
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (name, value) in &element.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                write_escaped(out, value);
                out.push('"');
            }
            if options.include_computed_style
                && let Some(style) = &element.computed_style
            {
                out.push_str(" style=[");
                for (i, (property, value)) in style.iter().enumerate() {
                    if i != 0 {
                        out.push_str("; ");
                    }
                    out.push_str(property);
                    out.push_str(": ");
                    write_escaped(out, &value.value);
                }
                out.push(']');
            }
            out.push('>');
        }
        NodeKind::Text(text) => {
            out.push('"');
            write_escaped(out, text);
            out.push('"');
        }
    }
    if !options.ignore_ids {
        write!(out, " id={}", id.0).ok();
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}
