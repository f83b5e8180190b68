//! Frontmatter serialization back to document text.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::splitter::reconstruct;
use super::types::{Frontmatter, HeaderFormat};

/// Errors that can occur while encoding a header.
#[derive(Debug, Error)]
pub enum HeaderEncodeError {
    #[error("failed to encode YAML header: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to encode TOML header: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("failed to encode JSON header: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode header fields as a fenced header block, in document order.
pub fn encode_header(
    fm: &Frontmatter,
    format: HeaderFormat,
) -> Result<String, HeaderEncodeError> {
    encode_header_with_order(fm, format, None)
}

/// Encode header fields with an optional preferred field order.
///
/// Fields named in `order` come first, the rest follow in document order.
/// An empty header encodes to an empty string.
pub fn encode_header_with_order(
    fm: &Frontmatter,
    format: HeaderFormat,
    order: Option<&[String]>,
) -> Result<String, HeaderEncodeError> {
    encode_fenced(fm, format, format.fence(), order)
}

/// Encode header fields between an explicit fence line.
///
/// Lets a header go back out with the fence it was read with, such as TOML
/// between `---` lines.
pub fn encode_header_with_fence(
    fm: &Frontmatter,
    format: HeaderFormat,
    fence: &str,
) -> Result<String, HeaderEncodeError> {
    encode_fenced(fm, format, fence, None)
}

fn encode_fenced(
    fm: &Frontmatter,
    format: HeaderFormat,
    fence: &str,
    order: Option<&[String]>,
) -> Result<String, HeaderEncodeError> {
    if fm.is_empty() {
        return Ok(String::new());
    }

    let mapping = ordered_fields(&fm.fields, order);
    let encoded = match format {
        HeaderFormat::Yaml => serde_yaml::to_string(&mapping)?,
        HeaderFormat::Toml => toml::to_string(&mapping)?,
        HeaderFormat::Json => serde_json::to_string_pretty(&mapping)? + "\n",
    };

    Ok(format!("{fence}\n{encoded}{fence}\n"))
}

/// Encode the header and join it with the body.
pub fn save(
    fm: &Frontmatter,
    format: HeaderFormat,
    body: &str,
) -> Result<String, HeaderEncodeError> {
    let header = encode_header(fm, format)?;
    Ok(reconstruct(&header, body))
}

/// Like [`save`], writing the header between `fence` lines.
pub fn save_with_fence(
    fm: &Frontmatter,
    format: HeaderFormat,
    fence: &str,
    body: &str,
) -> Result<String, HeaderEncodeError> {
    let header = encode_header_with_fence(fm, format, fence)?;
    Ok(reconstruct(&header, body))
}

fn ordered_fields(fields: &Mapping, order: Option<&[String]>) -> Mapping {
    let mut mapping = Mapping::new();

    if let Some(order_list) = order {
        for key in order_list {
            if let Some(value) = fields.get(key.as_str()) {
                mapping.insert(Value::String(key.clone()), value.clone());
            }
        }
    }

    for (key, value) in fields {
        if !mapping.contains_key(key) {
            mapping.insert(key.clone(), value.clone());
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parser::read_content;

    fn sample() -> Frontmatter {
        let mut fm = Frontmatter::new();
        fm.insert("title", Value::String("Test".into()));
        fm.insert("count", Value::Number(42.into()));
        fm
    }

    #[test]
    fn encode_empty_is_blank() {
        let out = encode_header(&Frontmatter::new(), HeaderFormat::Yaml).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn encode_yaml_keeps_document_order() {
        let out = encode_header(&sample(), HeaderFormat::Yaml).unwrap();
        assert_eq!(out, "---\ntitle: Test\ncount: 42\n---\n");
    }

    #[test]
    fn encode_with_preferred_order() {
        let order = vec!["count".to_string(), "missing".to_string()];
        let out =
            encode_header_with_order(&sample(), HeaderFormat::Yaml, Some(&order)).unwrap();
        assert_eq!(out, "---\ncount: 42\ntitle: Test\n---\n");
    }

    #[test]
    fn encode_toml_uses_plus_fence() {
        let out = encode_header(&sample(), HeaderFormat::Toml).unwrap();
        assert!(out.starts_with("+++\n"));
        assert!(out.contains("title = \"Test\""));
        assert!(out.ends_with("+++\n"));
    }

    #[test]
    fn save_keeps_dash_fence_around_toml() {
        let read = read_content("---\ntitle = \"Hi\"\n---\nBody\n");
        assert_eq!(read.format(), Some(HeaderFormat::Toml));
        assert_eq!(read.fence(), Some("---"));

        let mut fm = read.frontmatter().unwrap().clone();
        fm.insert("draft", Value::Bool(true));
        let text = save_with_fence(&fm, HeaderFormat::Toml, "---", read.body()).unwrap();
        assert!(text.starts_with("---\n"), "{text}");
        assert!(text.contains("title = \"Hi\"\n"));
        assert!(text.contains("draft = true\n"));
        assert!(text.ends_with("\n---\nBody"));

        let reread = read_content(&text);
        assert_eq!(reread.format(), Some(HeaderFormat::Toml));
        assert_eq!(reread.fence(), Some("---"));
        assert!(crate::frontmatter::split(&text).has_header());
    }

    #[test]
    fn fence_reports_plus_fence() {
        let read = read_content("+++\ntitle = \"Hi\"\n+++\nBody\n");
        assert_eq!(read.fence(), Some("+++"));
        assert_eq!(read_content("Body only\n").fence(), None);
    }

    #[test]
    fn save_round_trips_through_reader() {
        for format in [HeaderFormat::Yaml, HeaderFormat::Toml, HeaderFormat::Json] {
            let text = save(&sample(), format, "\n# Body\n").unwrap();
            let read = read_content(&text);
            assert_eq!(read.format(), Some(format), "format {format}");
            let fm = read.frontmatter().unwrap();
            assert_eq!(fm.get("title").and_then(Value::as_str), Some("Test"));
            assert_eq!(fm.get("count").and_then(Value::as_i64), Some(42));
            assert_eq!(read.body(), "# Body");
        }
    }

    #[test]
    fn save_without_fields_returns_body() {
        let text = save(&Frontmatter::new(), HeaderFormat::Yaml, "# Body\n").unwrap();
        assert_eq!(text, "# Body\n");
    }
}
