use html::{Token, tokenize};
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
    tokens: Vec<String>,
    error: Option<String>,
}

const FIXTURE_FORMAT_V1: u32 = 1;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tokenizer.toml")
}

fn load_cases() -> Vec<Case> {
    let path = fixture_path();
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read tokenizer fixtures {path:?}: {err}"));
    let file: FixtureFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse tokenizer fixtures {path:?}: {err}"));
    assert_eq!(
        file.format, FIXTURE_FORMAT_V1,
        "unsupported tokenizer fixture format in {path:?}"
    );
    file.cases
}

fn render_token(token: &Token) -> String {
    match token {
        Token::StartTag {
            name,
            attributes,
            self_closing,
        } => {
            let mut out = format!("<{name}");
            for (key, value) in attributes {
                out.push_str(&format!(" {key}=\"{value}\""));
            }
            if *self_closing {
                out.push('/');
            }
            out.push('>');
            out
        }
        Token::EndTag(name) => format!("</{name}>"),
        Token::Text(text) => format!("\"{text}\""),
        Token::EndOfInput => "EOF".to_string(),
    }
}

// Merges runs of text tokens so fixtures can spell text as one line.
fn render_stream(tokens: &[Token]) -> Vec<String> {
    let mut out = Vec::new();
    let mut text = None::<String>;
    for token in tokens {
        if let Token::Text(t) = token {
            text.get_or_insert_with(String::new).push_str(t);
            continue;
        }
        if let Some(pending) = text.take() {
            out.push(format!("\"{pending}\""));
        }
        out.push(render_token(token));
    }
    if let Some(pending) = text {
        out.push(format!("\"{pending}\""));
    }
    out
}

#[test]
fn tokenizer_fixtures() {
    let cases = load_cases();
    assert!(!cases.is_empty(), "no tokenizer fixtures");
    for case in cases {
        let mut tokens = Vec::new();
        let mut error = None;
        for result in tokenize(&case.input) {
            match result {
                Ok(token) => tokens.push(token),
                Err(err) => {
                    error = Some(format!("{:?}@{}", err.state, err.position));
                    break;
                }
            }
        }
        match (&case.error, error) {
            (Some(expected), Some(actual)) => {
                assert_eq!(&actual, expected, "fixture '{}': wrong error", case.name);
            }
            (None, None) => {
                assert_eq!(
                    render_stream(&tokens),
                    case.tokens,
                    "fixture '{}': token mismatch",
                    case.name
                );
            }
            (expected, actual) => panic!(
                "fixture '{}': expected error {expected:?}, got {actual:?}",
                case.name
            ),
        }
    }
}
