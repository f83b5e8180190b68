//! Splitting a document into header and body, and joining them back.

use super::types::{SplitDocument, YAML_FENCE};

/// Split a `---` fenced header off the start of a document.
///
/// The header is recognized only when the very first line is exactly `---`
/// and a later line is exactly `---` followed by a newline:
/// ```markdown
/// ---
/// title: Hello
/// ---
/// # Document content
/// ```
/// The header keeps both fence lines and the closing newline verbatim.
/// Without a header the whole input becomes the body.
pub fn split(content: &str) -> SplitDocument {
    match fenced_header_len(content, YAML_FENCE) {
        Some(len) => {
            tracing::debug!(header_bytes = len, "split header from document");
            SplitDocument {
                header: content[..len].to_string(),
                body: content[len..].to_string(),
            }
        }
        None => SplitDocument { header: String::new(), body: content.to_string() },
    }
}

/// Join a header and body back into a document.
///
/// An empty header returns the body untouched. Otherwise both parts are
/// trimmed and joined with a single newline, so whitespace at the seam is
/// normalized.
pub fn reconstruct(header: &str, body: &str) -> String {
    if header.is_empty() {
        return body.to_string();
    }
    format!("{}\n{}", header.trim(), body.trim())
}

/// Byte length of a header fenced by `fence` at the start of `content`,
/// up to and including the newline after the closing fence.
pub(crate) fn fenced_header_len(content: &str, fence: &str) -> Option<usize> {
    let after_open = content.strip_prefix(fence)?.strip_prefix('\n')?;
    let mut offset = content.len() - after_open.len();

    for line in after_open.split_inclusive('\n') {
        offset += line.len();
        if line.strip_suffix('\n') == Some(fence) {
            return Some(offset);
        }
    }
    None
}

/// Text between the fence lines of a header produced by [`fenced_header_len`].
pub(crate) fn header_inner<'a>(header: &'a str, fence: &str) -> &'a str {
    let start = fence.len() + 1;
    let end = header.len().saturating_sub(fence.len() + 1);
    if start >= end { "" } else { &header[start..end] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_no_header() {
        let doc = split("plain text");
        assert_eq!(doc.header, "");
        assert_eq!(doc.body, "plain text");
        assert!(!doc.has_header());
    }

    #[test]
    fn split_simple_header() {
        let doc = split("---\ntitle: Hello\n---\n# Content");
        assert_eq!(doc.header, "---\ntitle: Hello\n---\n");
        assert_eq!(doc.body, "# Content");
    }

    #[test]
    fn split_keeps_blank_line_in_body() {
        let doc = split("---\na: 1\n---\n\nBody\n");
        assert_eq!(doc.header, "---\na: 1\n---\n");
        assert_eq!(doc.body, "\nBody\n");
    }

    #[test]
    fn split_requires_newline_after_closing_fence() {
        let doc = split("---\ntitle: x\n---");
        assert_eq!(doc.header, "");
        assert_eq!(doc.body, "---\ntitle: x\n---");
    }

    #[test]
    fn split_requires_fence_on_first_line() {
        let input = "\n---\ntitle: x\n---\nbody";
        let doc = split(input);
        assert!(!doc.has_header());
        assert_eq!(doc.body, input);
    }

    #[test]
    fn split_ignores_longer_rules() {
        let input = "----\ntitle: x\n----\nbody";
        assert!(!split(input).has_header());
    }

    #[test]
    fn split_unclosed_header_is_body() {
        let input = "---\ntitle: x\nno closing fence\n";
        let doc = split(input);
        assert!(!doc.has_header());
        assert_eq!(doc.body, input);
    }

    #[test]
    fn split_stops_at_first_closing_fence() {
        let doc = split("---\na: 1\n---\ntext\n---\nmore\n");
        assert_eq!(doc.header, "---\na: 1\n---\n");
        assert_eq!(doc.body, "text\n---\nmore\n");
    }

    #[test]
    fn split_empty_header() {
        let doc = split("---\n---\nbody");
        assert_eq!(doc.header, "---\n---\n");
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn reconstruct_without_header_is_identity() {
        assert_eq!(reconstruct("", "plain text"), "plain text");
        assert_eq!(reconstruct("", "  spaced \n"), "  spaced \n");
    }

    #[test]
    fn reconstruct_trims_the_seam() {
        let out = reconstruct("---\na: 1\n---\n", "\n\n# Body\n\n");
        assert_eq!(out, "---\na: 1\n---\n# Body");
    }

    #[test]
    fn header_inner_strips_fences() {
        assert_eq!(header_inner("---\na: 1\n---\n", "---"), "a: 1\n");
        assert_eq!(header_inner("---\n---\n", "---"), "");
    }
}
