//! Layout integrity checks.
//!
//! These are lint passes: they report problems but never block
//! serialization. Callers decide what an invalid report means.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::types::{LayoutTree, PAGE_COMPONENT, ROOT_ID};

const ROOT_FIELDS: [&str; 3] = ["type", "props", "nodes"];

/// Result of checking a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    /// False as soon as any error is recorded.
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
}

impl Default for IntegrityReport {
    fn default() -> Self {
        Self::success()
    }
}

impl IntegrityReport {
    pub fn success() -> Self {
        Self { is_valid: true, errors: vec![], warnings: vec![] }
    }

    pub fn single_error(error: impl Into<String>) -> Self {
        let mut report = Self::success();
        report.add_error(error);
        report
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn merge(&mut self, other: IntegrityReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        if !other.is_valid {
            self.is_valid = false;
        }
    }
}

/// Check the shape of a layout's root entry from raw JSON text.
pub fn check_layout_json(json: &str) -> IntegrityReport {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => check_layout_value(&value),
        Err(e) => IntegrityReport::single_error(format!("layout is not valid JSON: {e}")),
    }
}

/// Check the shape of a layout's root entry.
///
/// A missing or non-object `ROOT` stops the check. Missing root fields and a
/// non-array child list are errors; an unexpected root type and extra
/// top-level entries are warnings.
pub fn check_layout_value(value: &Value) -> IntegrityReport {
    let mut report = IntegrityReport::success();

    let Some(entries) = value.as_object() else {
        report.add_error("layout must be a JSON object keyed by node id");
        return report;
    };

    let Some(root) = entries.get(ROOT_ID) else {
        report.add_error(format!("layout has no {ROOT_ID} node"));
        return report;
    };

    let Some(root) = root.as_object() else {
        report.add_error(format!("{ROOT_ID} node must be an object"));
        return report;
    };

    for field in ROOT_FIELDS {
        if !root.contains_key(field) {
            report.add_error(format!("{ROOT_ID} node is missing required field '{field}'"));
        }
    }

    if let Some(component) = root.get("type") {
        match component_name(component) {
            Some(PAGE_COMPONENT) => {}
            Some(other) => report.add_warning(format!(
                "unexpected {ROOT_ID} type '{other}', expected '{PAGE_COMPONENT}'"
            )),
            None => report.add_warning(format!(
                "{ROOT_ID} type has no component name, expected '{PAGE_COMPONENT}'"
            )),
        }
    }

    if let Some(nodes) = root.get("nodes")
        && !nodes.is_array()
    {
        report.add_error(format!("{ROOT_ID} field 'nodes' must be an array"));
    }

    let extra = entries.len() - 1;
    if extra > 0 {
        report.add_warning(format!(
            "layout has {extra} top-level entr{} besides {ROOT_ID}",
            if extra == 1 { "y" } else { "ies" }
        ));
    }

    report
}

fn component_name(value: &Value) -> Option<&str> {
    match value {
        Value::String(name) => Some(name),
        Value::Object(map) => map.get("resolvedName").and_then(Value::as_str),
        _ => None,
    }
}

/// Check the structure of a decoded tree.
///
/// Dangling child ids and cycles are errors. A child whose `parent` names a
/// different node, and nodes unreachable from the root, are warnings. Nodes
/// detached from the root are still checked for cycles.
pub fn check_tree(tree: &LayoutTree) -> IntegrityReport {
    let mut report = IntegrityReport::success();

    if tree.root().is_none() {
        report.add_error(format!("layout has no {ROOT_ID} node"));
        return report;
    }

    let mut visited = HashSet::new();
    walk(tree, ROOT_ID, Scope::Full, &mut visited, &mut report);

    let detached: Vec<&str> =
        tree.iter().map(|(id, _)| id).filter(|id| !visited.contains(id)).collect();
    for id in &detached {
        report.add_warning(format!("node '{id}' is not reachable from {ROOT_ID}"));
    }
    for id in detached {
        walk(tree, id, Scope::CyclesOnly, &mut visited, &mut report);
    }

    report
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Full,
    CyclesOnly,
}

/// Depth-first walk from `start` with an explicit stack, skipping nodes
/// already in `visited`.
fn walk<'a>(
    tree: &'a LayoutTree,
    start: &'a str,
    scope: Scope,
    visited: &mut HashSet<&'a str>,
    report: &mut IntegrityReport,
) {
    let Some(node) = tree.get(start) else {
        return;
    };
    if !visited.insert(start) {
        return;
    }

    // Ids on the path from `start` to the top frame.
    let mut path = HashSet::from([start]);
    let mut stack = vec![(start, node, 0usize)];

    while let Some(frame) = stack.last_mut() {
        let (id, node, next) = *frame;
        let Some(child) = node.nodes.get(next) else {
            path.remove(id);
            stack.pop();
            continue;
        };
        frame.2 += 1;

        let child = child.as_str();
        if path.contains(child) {
            report.add_error(format!("cycle: node '{child}' is its own ancestor (via '{id}')"));
            continue;
        }
        let Some(child_node) = tree.get(child) else {
            if scope == Scope::Full {
                report.add_error(format!("node '{id}' references missing child '{child}'"));
            }
            continue;
        };
        if scope == Scope::Full
            && let Some(parent) = child_node.parent.as_deref()
            && parent != id
        {
            report.add_warning(format!(
                "node '{child}' declares parent '{parent}' but is a child of '{id}'"
            ));
        }
        if visited.insert(child) {
            path.insert(child);
            stack.push((child, child_node, 0));
        }
    }
}

/// Run the shape check and, when the JSON decodes as a tree, the structural
/// check as well.
pub fn check_layout(json: &str) -> IntegrityReport {
    let mut report = check_layout_json(json);
    if report.errors.is_empty()
        && let Ok(tree) = super::types::parse_layout(json)
    {
        report.merge(check_tree(&tree));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::LayoutNode;

    #[test]
    fn report_merge_propagates_invalidity() {
        let mut a = IntegrityReport::success();
        a.add_warning("w");
        a.merge(IntegrityReport::single_error("e"));
        assert!(!a.is_valid);
        assert_eq!(a.errors, vec!["e"]);
        assert_eq!(a.warnings, vec!["w"]);
    }

    #[test]
    fn non_object_layout() {
        let report = check_layout_json("[1, 2]");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn non_object_root_short_circuits() {
        let report = check_layout_json(r#"{"ROOT": 3}"#);
        assert_eq!(report.errors, vec!["ROOT node must be an object"]);
    }

    #[test]
    fn extra_entries_warn() {
        let report = check_layout_json(
            r#"{"ROOT": {"type": "Page", "props": {}, "nodes": ["a"]},
                "a": {"type": "Heading", "props": {}, "nodes": []}}"#,
        );
        assert!(report.is_valid);
        assert_eq!(report.warnings, vec!["layout has 1 top-level entry besides ROOT"]);
    }

    #[test]
    fn tree_without_root() {
        let tree = LayoutTree::new().with_node("a", LayoutNode::new("Heading"));
        let report = check_tree(&tree);
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("ROOT"));
    }

    #[test]
    fn tree_dangling_and_cycle() {
        let tree = LayoutTree::new()
            .with_node(ROOT_ID, LayoutNode::new("Page").with_children(["a", "ghost"]))
            .with_node("a", LayoutNode::new("Section").with_children(["b"]))
            .with_node("b", LayoutNode::new("Section").with_children(["a"]));

        let report = check_tree(&tree);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "cycle: node 'a' is its own ancestor (via 'b')",
                "node 'ROOT' references missing child 'ghost'",
            ]
        );
    }

    #[test]
    fn tree_parent_mismatch_and_orphan() {
        let tree = LayoutTree::new()
            .with_node(ROOT_ID, LayoutNode::new("Page").with_children(["a"]))
            .with_node("a", LayoutNode::new("Heading").with_parent("elsewhere"))
            .with_node("orphan", LayoutNode::new("Heading"));

        let report = check_tree(&tree);
        assert!(report.is_valid);
        assert_eq!(
            report.warnings,
            vec![
                "node 'a' declares parent 'elsewhere' but is a child of 'ROOT'",
                "node 'orphan' is not reachable from ROOT",
            ]
        );
    }

    #[test]
    fn detached_cycle_is_an_error() {
        let tree = LayoutTree::new()
            .with_node(ROOT_ID, LayoutNode::new("Page"))
            .with_node("x", LayoutNode::new("Section").with_children(["y"]))
            .with_node("y", LayoutNode::new("Section").with_children(["x", "ghost"]));

        let report = check_tree(&tree);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["cycle: node 'x' is its own ancestor (via 'y')"]);
        assert_eq!(
            report.warnings,
            vec!["node 'x' is not reachable from ROOT", "node 'y' is not reachable from ROOT"]
        );
    }

    #[test]
    fn deeply_nested_chain_is_checked() {
        let depth = 20_000;
        let mut tree = LayoutTree::new()
            .with_node(ROOT_ID, LayoutNode::new("Page").with_children(["n0"]));
        for i in 0..depth {
            let parent = if i == 0 { ROOT_ID.to_string() } else { format!("n{}", i - 1) };
            let mut node = LayoutNode::new("Section").with_parent(&parent);
            if i + 1 < depth {
                node = node.with_children([format!("n{}", i + 1)]);
            }
            tree.insert(format!("n{i}"), node);
        }

        let report = check_tree(&tree);
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.warnings.is_empty());

        // Close the chain back onto its head.
        let last = format!("n{}", depth - 1);
        let tail = tree.get(&last).cloned().unwrap().with_children(["n0"]);
        tree.insert(last.clone(), tail);
        let report = check_tree(&tree);
        assert_eq!(
            report.errors,
            vec![format!("cycle: node 'n0' is its own ancestor (via '{last}')")]
        );
    }

    #[test]
    fn combined_check_skips_structure_on_shape_errors() {
        let report = check_layout(r#"{"ROOT": {"props": {}, "nodes": "x"}}"#);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn combined_check_reports_structure() {
        let report = check_layout(
            r#"{"ROOT": {"type": {"resolvedName": "Page"}, "props": {}, "nodes": ["missing"]}}"#,
        );
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["node 'ROOT' references missing child 'missing'"]);
    }
}
