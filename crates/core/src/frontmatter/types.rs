//! Frontmatter types and data structures.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Fence line for YAML (and JSON) headers.
pub const YAML_FENCE: &str = "---";

/// Fence line for TOML headers.
pub const TOML_FENCE: &str = "+++";

/// A document split into its raw header text and its body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitDocument {
    /// Header text including both fence lines and the closing newline.
    /// Empty when the document has no header.
    pub header: String,
    /// Everything after the header.
    pub body: String,
}

impl SplitDocument {
    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }
}

/// Decoded header fields, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter {
    pub fields: Mapping,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(Value::String(key.into()), value)
    }

    /// Remove a field, keeping the relative order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// String keys in document order. Non-string keys are skipped.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().filter_map(Value::as_str)
    }
}

/// Serialization format of a header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFormat {
    Yaml,
    Toml,
    Json,
}

impl HeaderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderFormat::Yaml => "yaml",
            HeaderFormat::Toml => "toml",
            HeaderFormat::Json => "json",
        }
    }

    /// Fence line used when writing a header in this format.
    pub fn fence(&self) -> &'static str {
        match self {
            HeaderFormat::Toml => TOML_FENCE,
            HeaderFormat::Yaml | HeaderFormat::Json => YAML_FENCE,
        }
    }
}

impl fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HeaderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(HeaderFormat::Yaml),
            "toml" => Ok(HeaderFormat::Toml),
            "json" => Ok(HeaderFormat::Json),
            other => Err(format!("unknown header format '{other}'")),
        }
    }
}

/// What happened when the header was decoded.
///
/// Decoding never fails outright: a header that cannot be decoded is
/// reported as [`HeaderOutcome::Degraded`] and the body stays usable.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderOutcome {
    /// The document has no header.
    Absent,
    /// The header was decoded into a mapping.
    Decoded { format: HeaderFormat, frontmatter: Frontmatter },
    /// The header was found but could not be decoded.
    Degraded { format: HeaderFormat, error: String },
}

impl HeaderOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            HeaderOutcome::Absent => "absent",
            HeaderOutcome::Decoded { .. } => "decoded",
            HeaderOutcome::Degraded { .. } => "degraded",
        }
    }
}

/// Result of a format-aware read of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRead {
    /// The split document, with line endings normalized to `\n`.
    pub document: SplitDocument,
    pub outcome: HeaderOutcome,
    /// Diagnostic lines describing detection and decoding, in order.
    pub trace: Vec<String>,
}

impl ContentRead {
    pub fn format(&self) -> Option<HeaderFormat> {
        match &self.outcome {
            HeaderOutcome::Absent => None,
            HeaderOutcome::Decoded { format, .. } | HeaderOutcome::Degraded { format, .. } => {
                Some(*format)
            }
        }
    }

    pub fn frontmatter(&self) -> Option<&Frontmatter> {
        match &self.outcome {
            HeaderOutcome::Decoded { frontmatter, .. } => Some(frontmatter),
            _ => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, HeaderOutcome::Degraded { .. })
    }

    /// Fence line the header was written with, `None` without a header.
    ///
    /// This can differ from [`HeaderFormat::fence`]: TOML is also accepted
    /// between `---` lines.
    pub fn fence(&self) -> Option<&'static str> {
        let header = &self.document.header;
        if header.is_empty() {
            None
        } else if header.starts_with(TOML_FENCE) {
            Some(TOML_FENCE)
        } else {
            Some(YAML_FENCE)
        }
    }

    pub fn body(&self) -> &str {
        &self.document.body
    }
}

/// A single edit applied to header fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEdit {
    /// Field name to modify.
    pub field: String,
    pub op: FieldEditOp,
    /// Operand for set, increment and append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldEdit {
    pub fn set(field: impl Into<String>, value: Value) -> Self {
        Self { field: field.into(), op: FieldEditOp::Set, value: Some(value) }
    }

    pub fn remove(field: impl Into<String>) -> Self {
        Self { field: field.into(), op: FieldEditOp::Remove, value: None }
    }
}

/// Type of header edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldEditOp {
    /// Set field to value (creates if missing).
    Set,
    /// Delete the field if present.
    Remove,
    /// Toggle boolean field.
    Toggle,
    /// Increment numeric field.
    Increment,
    /// Append to list field.
    Append,
}
