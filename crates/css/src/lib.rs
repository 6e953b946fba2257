pub mod syntax;
pub mod selector;
pub mod cascade;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use syntax::{
    Declaration, Rule, Stylesheet, StyleParseError, StyleParseErrorKind, parse_declarations,
    parse_stylesheet,
};
pub use selector::{SelectorSubject, match_simple_selector, matches};
pub use cascade::{ComputedStyle, ComputedValue, Specificity, compute_style, specificity};
pub use values::{ResolvedStyle, StyleValue, resolve_style, resolve_value};
