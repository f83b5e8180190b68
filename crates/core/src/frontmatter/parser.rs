//! Format-aware frontmatter reading.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::splitter::{fenced_header_len, header_inner};
use super::types::{
    ContentRead, Frontmatter, HeaderFormat, HeaderOutcome, SplitDocument, TOML_FENCE,
    YAML_FENCE,
};

/// How many leading non-empty lines are inspected for `key = value` pairs.
const SNIFF_LINES: usize = 5;

static TOML_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^["']?[A-Za-z0-9_.\-]+["']?\s*=(\s|$)"#).expect("valid TOML pair regex")
});

static TOML_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[?[A-Za-z0-9_.\-]+\]\]?$").expect("valid TOML table regex"));

/// Errors raised while decoding a header body.
///
/// These never escape [`read_content`]; they are folded into
/// [`HeaderOutcome::Degraded`].
#[derive(Debug, Error)]
pub enum HeaderDecodeError {
    #[error("invalid YAML header: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML header: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON header: {0}")]
    Json(#[from] serde_json::Error),

    #[error("header must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Read a document, detecting and decoding its header.
///
/// Line endings are normalized to `\n` first. A header may be fenced by
/// `---` (YAML or JSON content) or `+++` (TOML content). Decoding problems
/// are reported in the returned [`ContentRead`], never as an error.
pub fn read_content(content: &str) -> ContentRead {
    let normalized = content.replace("\r\n", "\n");
    let mut trace = Vec::new();

    let fence = if normalized.starts_with("+++\n") { TOML_FENCE } else { YAML_FENCE };
    let Some(len) = fenced_header_len(&normalized, fence) else {
        trace.push("no header fence found".to_string());
        return ContentRead {
            document: SplitDocument { header: String::new(), body: normalized },
            outcome: HeaderOutcome::Absent,
            trace,
        };
    };

    let header = &normalized[..len];
    let inner = header_inner(header, fence);
    let format = detect_format(fence, inner);
    trace.push(format!("found '{fence}' fenced header ({len} bytes)"));
    trace.push(format!("detected format: {format}"));

    let outcome = match decode(inner, format) {
        Ok(frontmatter) => {
            trace.push(format!("decoded {} field(s)", frontmatter.len()));
            HeaderOutcome::Decoded { format, frontmatter }
        }
        Err(e) => {
            tracing::warn!(%format, error = %e, "header could not be decoded");
            trace.push(format!("decode failed: {e}"));
            HeaderOutcome::Degraded { format, error: e.to_string() }
        }
    };

    ContentRead {
        document: SplitDocument {
            header: header.to_string(),
            body: normalized[len..].to_string(),
        },
        outcome,
        trace,
    }
}

/// Classify a header body by its fence and its first non-whitespace content.
///
/// `+++` always means TOML. Otherwise a leading `{` means JSON, and a
/// `key = value` pair or `[table]` line among the first few lines means
/// TOML. Everything else is treated as YAML.
pub fn detect_format(fence: &str, inner: &str) -> HeaderFormat {
    if fence == TOML_FENCE {
        return HeaderFormat::Toml;
    }
    if inner.trim_start().starts_with('{') {
        return HeaderFormat::Json;
    }

    let looks_like_toml = inner
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .take(SNIFF_LINES)
        .any(|l| TOML_PAIR.is_match(l) || TOML_TABLE.is_match(l));

    if looks_like_toml { HeaderFormat::Toml } else { HeaderFormat::Yaml }
}

/// Decode a header body in the given format.
pub fn decode(inner: &str, format: HeaderFormat) -> Result<Frontmatter, HeaderDecodeError> {
    if inner.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    let value = match format {
        HeaderFormat::Yaml => serde_yaml::from_str::<Value>(inner)?,
        HeaderFormat::Toml => toml_to_yaml(toml::Value::Table(toml::from_str(inner)?)),
        HeaderFormat::Json => json_to_yaml(serde_json::from_str(inner)?),
    };

    match value {
        Value::Mapping(fields) => Ok(Frontmatter { fields }),
        Value::Null => Ok(Frontmatter::default()),
        other => Err(HeaderDecodeError::NotAMapping(yaml_kind(&other))),
    }
}

fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(toml_to_yaml).collect())
        }
        toml::Value::Table(table) => Value::Mapping(
            table.into_iter().map(|(k, v)| (Value::String(k), toml_to_yaml(v))).collect(),
        ),
    }
}

fn json_to_yaml(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                Value::Number(n.as_f64().unwrap_or(f64::NAN).into())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(json_to_yaml).collect())
        }
        serde_json::Value::Object(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (Value::String(k), json_to_yaml(v)))
                .collect::<Mapping>(),
        ),
    }
}

pub(crate) fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
