use crate::selector::{SelectorSubject, matches};
use crate::syntax::Stylesheet;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Specificity(pub u16, pub u16, pub u16, pub u16); // (inline, id, class, type)

/// One cascaded declaration: the winning value and the specificity it won with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputedValue {
    pub value: String,
    pub priority: Specificity,
}

/// Property name -> winning declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    properties: BTreeMap<String, ComputedValue>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&ComputedValue> {
        self.properties.get(property)
    }

    pub fn value(&self, property: &str) -> Option<&str> {
        self.get(property).map(|v| v.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComputedValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records `value` for `property` unless an equal or stronger declaration
    /// is already there. Returns whether the stored value changed.
    ///
    /// Ties keep the first writer; a later rule with the same specificity
    /// does not override an earlier one.
    pub fn merge(&mut self, property: &str, value: &str, priority: Specificity) -> bool {
        match self.properties.entry(property.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(ComputedValue {
                    value: value.to_string(),
                    priority,
                });
                true
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                if priority > current.priority {
                    current.value = value.to_string();
                    current.priority = priority;
                    true
                } else {
                    false
                }
            }
        }
    }
}

// input: "#nav .item a"
// output: Specificity(0, 1, 1, 1)
pub fn specificity(selector: &str) -> Specificity {
    let mut weight = Specificity::default();
    for part in selector.split_whitespace() {
        if part.starts_with('#') {
            weight.1 = weight.1.saturating_add(1);
        } else if part.starts_with('.') {
            weight.2 = weight.2.saturating_add(1);
        } else {
            weight.3 = weight.3.saturating_add(1);
        }
    }
    weight
}

/// Cascades every rule of `sheet` that matches `element` into a fresh
/// computed style. `ancestors` is the open-element chain, innermost first.
///
/// Returns `None` when no rule matched. A rule with several selectors applies
/// once, with the highest specificity among the selectors that matched.
pub fn compute_style<E: SelectorSubject + ?Sized>(
    element: &E,
    ancestors: &[&E],
    sheet: &Stylesheet,
) -> Option<ComputedStyle> {
    let mut style: Option<ComputedStyle> = None;

    for rule in sheet.iter() {
        let matched_specificity = rule
            .selectors
            .iter()
            .filter(|selector| matches(element, ancestors.iter().copied(), selector))
            .map(|selector| specificity(selector))
            .max();
        let Some(priority) = matched_specificity else {
            continue;
        };

        let style = style.get_or_insert_with(ComputedStyle::new);
        for declaration in &rule.declarations {
            style.merge(&declaration.name, &declaration.value, priority);
        }
    }

    style
}
