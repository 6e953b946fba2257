//! Selector matching for the simple-selector / descendant-chain subset.
//!
//! A selector is a whitespace-separated chain of simple selectors (`#id`,
//! `.class` or a tag name). The rightmost part must match the element; the
//! remaining parts are consumed by a single greedy pass over the ancestor
//! chain, innermost first, and the walk never revisits an ancestor.
//! `div p` against `div > section > p` matches.

/// What the matcher needs to know about an element.
pub trait SelectorSubject {
    fn tag_name(&self) -> &str;

    /// Attribute lookup, last occurrence wins.
    fn attribute(&self, name: &str) -> Option<&str>;
}

// Check if an element matches one simple selector
pub fn match_simple_selector<E: SelectorSubject + ?Sized>(element: &E, part: &str) -> bool {
    if part.is_empty() {
        return false;
    }
    if let Some(want) = part.strip_prefix('#') {
        return element.attribute("id").is_some_and(|id| id == want);
    }
    if let Some(want) = part.strip_prefix('.') {
        // The whole attribute is compared: `.a` does not match `class="a b"`.
        return element.attribute("class").is_some_and(|class| class == want);
    }
    element.tag_name() == part
}

/// Matches `selector` against `element` whose ancestors are given innermost
/// first (parent, grandparent, ..., document).
pub fn matches<'a, E, I>(element: &E, ancestors: I, selector: &str) -> bool
where
    E: SelectorSubject + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let parts: Vec<&str> = selector.split_whitespace().rev().collect();
    let Some((subject, rest)) = parts.split_first() else {
        return false;
    };
    if !match_simple_selector(element, subject) {
        return false;
    }

    let mut next = 0;
    for ancestor in ancestors {
        if next == rest.len() {
            break;
        }
        if match_simple_selector(ancestor, rest[next]) {
            next += 1;
        }
    }
    next == rest.len()
}
