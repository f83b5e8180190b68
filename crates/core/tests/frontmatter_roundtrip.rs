use folio_core::frontmatter::{
    FieldEdit, HeaderFormat, HeaderOutcome, apply_edits, read_content, reconstruct, save, split,
};
use rstest::rstest;
use serde_yaml::Value;

/// Trim whitespace at the header/body seam and at the document edges.
fn normalize(text: &str) -> String {
    let doc = split(text);
    format!("{}\n{}", doc.header.trim(), doc.body.trim())
}

#[rstest]
#[case("---\ntitle: Hello\n---\n# Body")]
#[case("---\ntitle: Hello\n---\n\n\n# Body\n\nMore text.\n")]
#[case("---\ntags:\n  - a\n  - b\nnested:\n  key: value\n---\nBody with --- inside\n")]
#[case("---\n---\nEmpty header\n")]
fn reconstruct_split_is_normalized_identity(#[case] text: &str) {
    let doc = split(text);
    assert!(doc.has_header());
    assert_eq!(reconstruct(&doc.header, &doc.body), normalize(text));
}

#[rstest]
#[case("plain text")]
#[case("  leading and trailing  \n")]
#[case("--- not a fence\n---\n")]
#[case("")]
fn documents_without_header_pass_through(#[case] text: &str) {
    let doc = split(text);
    assert_eq!(doc.header, "");
    assert_eq!(doc.body, text);
    assert_eq!(reconstruct(&doc.header, &doc.body), text);
}

#[test]
fn edit_and_save_keeps_body_and_field_order() {
    let original = "---\ntitle: Draft\ndraft: true\ncount: 1\n---\n\n# Heading\n\nText.\n";
    let read = read_content(original);
    let mut fm = read.frontmatter().cloned().expect("decoded header");

    apply_edits(
        &mut fm,
        &[
            FieldEdit::set("title", Value::String("Published".into())),
            FieldEdit::remove("draft"),
        ],
    )
    .unwrap();

    let saved = save(&fm, read.format().unwrap(), read.body()).unwrap();
    assert_eq!(saved, "---\ntitle: Published\ncount: 1\n---\n# Heading\n\nText.");
}

#[test]
fn degraded_header_keeps_body_and_raw_header() {
    let original = "---\ntitle: \"unterminated\n---\nBody\n";
    let read = read_content(original);
    match &read.outcome {
        HeaderOutcome::Degraded { format, error } => {
            assert_eq!(*format, HeaderFormat::Yaml);
            assert!(!error.is_empty());
        }
        other => panic!("expected degraded header, got {other:?}"),
    }
    assert_eq!(read.document.header, "---\ntitle: \"unterminated\n---\n");
    assert_eq!(read.body(), "Body\n");
    assert_eq!(reconstruct(&read.document.header, read.body()), original.trim());
}

#[test]
fn toml_document_round_trips_in_toml() {
    let original = "+++\ntitle = \"Hello\"\nweight = 3\n+++\nBody\n";
    let read = read_content(original);
    assert_eq!(read.format(), Some(HeaderFormat::Toml));

    let fm = read.frontmatter().unwrap();
    let saved = save(fm, HeaderFormat::Toml, read.body()).unwrap();
    let reread = read_content(&saved);
    assert_eq!(reread.frontmatter(), Some(fm));
    assert_eq!(reread.body(), "Body");
}
