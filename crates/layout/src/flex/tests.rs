use super::{Axis, Edge, FlexLayout, layout};
use css::StyleValue;
use html::{Document, NodeId, parse};

// Parses `body` behind a stylesheet and returns the document with the id of
// the single `<main>` container.
fn container(css: &str, body: &str) -> (Document, NodeId) {
    let doc = parse(&format!("<style>{css}</style>{body}")).expect("fixture must parse");
    let main = doc.elements_by_tag_name("main");
    assert_eq!(main.len(), 1, "fixture needs exactly one <main>");
    (doc, main[0])
}

fn run(css: &str, body: &str) -> (Document, NodeId, FlexLayout) {
    let (mut doc, id) = container(css, body);
    let flex = layout(&mut doc, id).expect("container is flex");
    (doc, id, flex)
}

fn item_ids(doc: &Document, name: &str) -> Vec<NodeId> {
    doc.elements_by_tag_name(name)
}

fn style_of(doc: &Document, id: NodeId, property: &str) -> Option<StyleValue> {
    doc.element(id)
        .and_then(|e| e.style.as_ref())
        .and_then(|s| s.get(property))
        .cloned()
}

#[test]
fn exact_fit_stays_on_one_line() {
    let (doc, _, flex) = run(
        "main{display:flex;width:300px} i{width:100px}",
        "<main><i></i><i></i><i></i></main>",
    );
    assert!(!flex.is_auto_main_size);
    assert_eq!(flex.lines.len(), 1);
    assert_eq!(flex.lines[0].items, item_ids(&doc, "i"));
    assert_eq!(flex.lines[0].main_space, 0.0);
}

#[test]
fn overflow_opens_new_lines() {
    let (doc, _, flex) = run(
        "main{display:flex;flex-wrap:wrap;width:300px} i{width:120px}",
        "<main><i></i><i></i><i></i><i></i><i></i></main>",
    );
    let items = item_ids(&doc, "i");
    assert_eq!(flex.lines.len(), 3);
    assert_eq!(flex.lines[0].items, items[0..2]);
    assert_eq!(flex.lines[1].items, items[2..4]);
    assert_eq!(flex.lines[2].items, items[4..5]);
    for line in &flex.lines[..2] {
        assert_eq!(line.main_space, 60.0);
    }
    assert_eq!(flex.lines[2].main_space, 180.0);
}

#[test]
fn cross_space_is_the_tallest_item() {
    let (_, _, flex) = run(
        "main{display:flex;width:100px} #a{width:50px;height:10px} #b{width:50px;height:30px} #c{width:60px;height:5px}",
        "<main><i id=\"a\"></i><i id=\"b\"></i><i id=\"c\"></i></main>",
    );
    assert_eq!(flex.lines.len(), 2);
    assert_eq!(flex.lines[0].cross_space, 30.0);
    assert_eq!(flex.lines[1].cross_space, 5.0);
    assert_eq!(flex.lines[1].main_space, 40.0);
}

#[test]
fn oversized_item_is_clamped_to_the_container() {
    let (doc, _, flex) = run(
        "main{display:flex;width:100px} i{width:250px}",
        "<main><i></i><i></i></main>",
    );
    let items = item_ids(&doc, "i");
    assert_eq!(style_of(&doc, items[0], "width"), Some(StyleValue::Number(100.0)));
    assert_eq!(flex.lines.len(), 2);
    assert_eq!(flex.lines[0].main_space, 0.0);
}

#[test]
fn items_are_sorted_by_order() {
    let (doc, _, flex) = run(
        "main{display:flex;width:300px} #a{order:2} #b{order:-1} #c{width:10px}",
        "<main><i id=\"a\"></i><i id=\"b\"></i><i id=\"c\"></i></main>",
    );
    let items = item_ids(&doc, "i");
    assert_eq!(flex.lines[0].items, vec![items[1], items[2], items[0]]);
}

#[test]
fn flex_items_join_the_current_line() {
    let (doc, _, flex) = run(
        "main{display:flex;width:100px} #a{width:100px} #b{flex:1;width:500px}",
        "<main><i id=\"a\"></i><i id=\"b\"></i></main>",
    );
    assert_eq!(flex.lines.len(), 1);
    assert_eq!(flex.lines[0].items, item_ids(&doc, "i"));
    assert_eq!(flex.lines[0].main_space, 0.0);
}

#[test]
fn defaults_are_written_with_the_alignment_quirk() {
    let (doc, id, _) = run("main{display:flex;width:10px}", "<main></main>");
    assert_eq!(
        style_of(&doc, id, "flex-direction"),
        Some(StyleValue::Keyword("stretch".into()))
    );
    assert_eq!(
        style_of(&doc, id, "flex-wrap"),
        Some(StyleValue::Keyword("stretch".into()))
    );
    assert_eq!(
        style_of(&doc, id, "justify-content"),
        Some(StyleValue::Keyword("flex-start".into()))
    );
    assert_eq!(style_of(&doc, id, "align-items"), None);
}

#[test]
fn explicit_alignment_keeps_direction_and_wrap() {
    let (doc, id, flex) = run(
        "main{display:flex;height:50px;flex-direction:column;align-items:center;align-content:center}",
        "<main></main>",
    );
    assert_eq!(
        style_of(&doc, id, "flex-direction"),
        Some(StyleValue::Keyword("column".into()))
    );
    assert_eq!(
        style_of(&doc, id, "flex-wrap"),
        Some(StyleValue::Keyword("nowrap".into()))
    );
    assert_eq!(flex.mapping.main_size, Axis::Height);
    assert_eq!(flex.mapping.cross_size, Axis::Width);
    assert_eq!(flex.mapping.main_start, Edge::Top);
    assert!(flex.lines.is_empty());
}

#[test]
fn unset_alignment_overrides_column_direction() {
    let (_, _, flex) = run(
        "main{display:flex;width:10px;flex-direction:column}",
        "<main></main>",
    );
    assert_eq!(flex.mapping.main_size, Axis::Width);
    assert_eq!(flex.mapping.main_start, Edge::Left);
}

#[test]
fn row_reverse_starts_from_the_right() {
    let (_, _, flex) = run(
        "main{display:flex;width:80px;flex-direction:row-reverse;align-items:start}",
        "<main></main>",
    );
    let m = flex.mapping;
    assert_eq!((m.main_start, m.main_end), (Edge::Right, Edge::Left));
    assert_eq!(m.main_sign, -1);
    assert_eq!(m.main_base, 80.0);
}

#[test]
fn column_reverse_uses_height_as_base() {
    let (_, _, flex) = run(
        "main{display:flex;height:40px;flex-direction:column-reverse;align-items:start}",
        "<main></main>",
    );
    let m = flex.mapping;
    assert_eq!(m.main_size, Axis::Height);
    assert_eq!((m.main_start, m.main_end), (Edge::Bottom, Edge::Top));
    assert_eq!(m.main_base, 40.0);
}

#[test]
fn wrap_reverse_flips_the_cross_axis() {
    let (_, _, flex) = run(
        "main{display:flex;width:10px;flex-wrap:wrap-reverse;align-content:start}",
        "<main></main>",
    );
    let m = flex.mapping;
    assert_eq!((m.cross_start, m.cross_end), (Edge::Bottom, Edge::Top));
    assert_eq!(m.cross_sign, -1);
}

#[test]
fn auto_main_size_with_nowrap_accumulates_without_wrapping() {
    let (doc, id, flex) = run(
        "main{display:flex;width:auto;align-content:start} i{width:70px;height:8px}",
        "<main><i></i><i></i></main>",
    );
    assert!(flex.is_auto_main_size);
    assert_eq!(style_of(&doc, id, "width"), Some(StyleValue::Number(0.0)));
    assert_eq!(flex.lines.len(), 1);
    assert_eq!(flex.lines[0].main_space, -140.0);
    assert_eq!(flex.lines[0].cross_space, 8.0);
}

#[test]
fn auto_main_size_without_nowrap_clamps_everything_to_zero() {
    let (doc, _, flex) = run(
        "main{display:flex} i{width:70px}",
        "<main><i></i><i></i></main>",
    );
    assert!(flex.is_auto_main_size);
    assert_eq!(flex.lines.len(), 1);
    assert_eq!(flex.lines[0].items.len(), 2);
    for item in item_ids(&doc, "i") {
        assert_eq!(style_of(&doc, item, "width"), Some(StyleValue::Number(0.0)));
    }
}

#[test]
fn text_children_are_not_items() {
    let (_, _, flex) = run(
        "main{display:flex;width:100px} i{width:10px}",
        "<main>a<i></i>b</main>",
    );
    assert_eq!(flex.lines.len(), 1);
    assert_eq!(flex.lines[0].items.len(), 1);
}

#[test]
fn non_flex_element_still_gets_resolved_style() {
    let (mut doc, id) = container("main{width:12px;color:red}", "<main></main>");
    assert!(layout(&mut doc, id).is_none());
    assert_eq!(style_of(&doc, id, "width"), Some(StyleValue::Number(12.0)));
    assert_eq!(
        style_of(&doc, id, "color"),
        Some(StyleValue::Keyword("red".into()))
    );
}

#[test]
fn unstyled_element_is_left_alone() {
    let (mut doc, id) = container("p{width:1px}", "<main></main>");
    assert!(layout(&mut doc, id).is_none());
    assert!(doc.element(id).is_some_and(|e| e.style.is_none()));
}
