use html::dom_snapshot::{DomSnapshotOptions, compare_dom};
use html::{ParseError, parse};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct FixtureFile {
    format: u32,
    #[serde(rename = "case")]
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    input: String,
    #[serde(default)]
    style: bool,
    #[serde(default)]
    dom: Vec<String>,
    /// Exact `Display` output of the expected error.
    error: Option<String>,
    error_kind: Option<ErrorKind>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum ErrorKind {
    Malformed,
    Mismatch,
    Style,
    Document,
}

impl ErrorKind {
    fn of(err: &ParseError) -> Self {
        match err {
            ParseError::MalformedMarkup(_) => ErrorKind::Malformed,
            ParseError::TagMismatch(_) => ErrorKind::Mismatch,
            ParseError::Style(_) => ErrorKind::Style,
            ParseError::Document(_) => ErrorKind::Document,
        }
    }
}

const FIXTURE_FORMAT_V1: u32 = 1;

fn load_cases() -> Vec<Case> {
    let path: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tree_builder.toml");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read tree builder fixtures {path:?}: {err}"));
    let file: FixtureFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse tree builder fixtures {path:?}: {err}"));
    assert_eq!(
        file.format, FIXTURE_FORMAT_V1,
        "unsupported tree builder fixture format in {path:?}"
    );
    file.cases
}

#[test]
fn tree_builder_fixtures() {
    let cases = load_cases();
    assert!(!cases.is_empty(), "no tree builder fixtures");
    for case in cases {
        let expects_error = case.error.is_some() || case.error_kind.is_some();
        match parse(&case.input) {
            Ok(doc) => {
                assert!(!expects_error, "fixture '{}': expected an error", case.name);
                let options = DomSnapshotOptions {
                    ignore_ids: true,
                    include_computed_style: case.style,
                };
                let expected: Vec<&str> = case.dom.iter().map(String::as_str).collect();
                if let Err(mismatch) = compare_dom(&expected, &doc, options) {
                    panic!("fixture '{}': {mismatch}", case.name);
                }
            }
            Err(err) => {
                assert!(
                    expects_error,
                    "fixture '{}': unexpected error: {err}",
                    case.name
                );
                if let Some(message) = &case.error {
                    assert_eq!(&err.to_string(), message, "fixture '{}'", case.name);
                }
                if let Some(kind) = case.error_kind {
                    assert_eq!(ErrorKind::of(&err), kind, "fixture '{}'", case.name);
                }
            }
        }
    }
}
