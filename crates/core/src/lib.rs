//! Document round-trip pipeline for page editors.
//!
//! - [`frontmatter`]: split a fenced header from a document, decode it in
//!   whatever format it was written in, edit it, and write it back.
//! - [`layout`]: serialize a visual layout tree to markup with imports, and
//!   lint layouts for structural problems.
//! - [`config`]: load the TOML configuration shared by the CLI.

pub mod config;
pub mod frontmatter;
pub mod layout;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
