//! Content-type sniffing for response bodies.
//!
//! Only the media type matters; parameters such as `charset` are ignored and
//! matching is ASCII case-insensitive.
use memchr::memchr2_iter;

const HTML_MEDIA_TYPES: [&[u8]; 2] = [b"text/html", b"application/xhtml"];

/// Whether a `Content-Type` header value names an HTML document.
/// A missing header is never HTML.
pub fn is_html(content_type: &Option<String>) -> bool {
    content_type.as_deref().is_some_and(|value| {
        HTML_MEDIA_TYPES
            .iter()
            .any(|media_type| contains_ignore_ascii_case(value.as_bytes(), media_type))
    })
}

// input: b"Text/HTML; charset=utf-8", b"text/html"
// output: true
fn contains_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    let Some(&first) = needle.first() else {
        return true;
    };
    memchr2_iter(
        first.to_ascii_lowercase(),
        first.to_ascii_uppercase(),
        haystack,
    )
    .any(|start| {
        haystack
            .get(start..start + needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::{contains_ignore_ascii_case, is_html};

    #[test]
    fn html_content_types() {
        assert!(is_html(&Some("text/html".to_string())));
        assert!(is_html(&Some("Text/HTML; charset=utf-8".to_string())));
        assert!(is_html(&Some("application/xhtml+xml".to_string())));
        assert!(!is_html(&Some("text/css".to_string())));
        assert!(!is_html(&Some("t".to_string())));
        assert!(!is_html(&None));
    }

    #[test]
    fn needle_may_start_after_a_false_candidate() {
        assert!(contains_ignore_ascii_case(b"ttext/html", b"text/html"));
        assert!(contains_ignore_ascii_case(b"anything", b""));
        assert!(!contains_ignore_ascii_case(b"text/ht", b"text/html"));
    }
}
