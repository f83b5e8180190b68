//! Frontmatter splitting, decoding, editing, and serialization.
//!
//! This module provides functionality to:
//! - Split a `---` fenced header from a document and join it back
//! - Detect the header format (YAML, TOML, JSON) and decode it without failing
//! - Edit header fields (set, remove, toggle, increment, append)
//! - Encode header fields back into a fenced block

pub mod modifier;
pub mod parser;
pub mod serializer;
pub mod splitter;
pub mod types;

pub use modifier::{FrontmatterEditError, apply_edits};
pub use parser::{HeaderDecodeError, decode, detect_format, read_content};
pub use serializer::{
    HeaderEncodeError, encode_header, encode_header_with_fence, encode_header_with_order, save,
    save_with_fence,
};
pub use splitter::{reconstruct, split};
pub use types::{
    ContentRead, FieldEdit, FieldEditOp, Frontmatter, HeaderFormat, HeaderOutcome,
    SplitDocument, TOML_FENCE, YAML_FENCE,
};
