use crate::cascade::ComputedStyle;
use std::collections::BTreeMap;

/// A computed value after px/number coercion.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Keyword(String),
    /// Explicitly unset (`auto` sizes after normalization).
    Unset,
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            StyleValue::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// `0`, `""` and unset count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            StyleValue::Number(n) => *n != 0.0,
            StyleValue::Keyword(k) => !k.is_empty(),
            StyleValue::Unset => false,
        }
    }
}

/// Resolved style of one element, keyed by CSS property name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedStyle {
    values: BTreeMap<String, StyleValue>,
}

impl ResolvedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.values.get(property)
    }

    pub fn set(&mut self, property: &str, value: StyleValue) {
        self.values.insert(property.to_string(), value);
    }

    pub fn number(&self, property: &str) -> Option<f64> {
        self.get(property).and_then(StyleValue::as_number)
    }

    pub fn keyword(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(StyleValue::as_keyword)
    }

    /// True when the property is missing, unset, `0` or empty.
    pub fn is_absent(&self, property: &str) -> bool {
        !self.get(property).is_some_and(StyleValue::is_present)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// Leading-integer parse: optional sign then digits, rest ignored.
// "10.5px" -> 10, "px" -> None
fn parse_leading_int(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<f64>().ok().map(|n| sign * n)
}

fn is_plain_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

// input: "100px" | "12" | "flex"
// output: Number(100.0) | Number(12.0) | Keyword("flex")
pub fn resolve_value(raw: &str) -> StyleValue {
    if raw.ends_with("px") || is_plain_number(raw) {
        if let Some(n) = parse_leading_int(raw) {
            return StyleValue::Number(n);
        }
    }
    StyleValue::Keyword(raw.to_string())
}

/// Copies every computed value into `into`, coerced with [`resolve_value`].
/// Properties already in `into` that the computed style does not mention are
/// left alone.
pub fn resolve_style(computed: &ComputedStyle, into: &mut ResolvedStyle) {
    for (property, computed_value) in computed.iter() {
        into.set(property, resolve_value(&computed_value.value));
    }
}
