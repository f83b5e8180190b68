//! Layout tree to markup serialization.
//!
//! The output is an import block followed by a blank line and the rendered
//! body:
//!
//! ```text
//! import Section from "../components/Section.astro";
//! import Heading from "../components/Heading.astro";
//!
//! <Section padding={2}>
//! <Heading text="Hello" />
//! </Section>
//! ```
//!
//! Serialization never fails. Unknown component types, dangling child ids
//! and cycles render as markup comments so the rest of the tree survives.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::registry::{ComponentRegistry, Resolved};
use super::types::{LayoutNode, LayoutTree, ROOT_ID};

/// Serialize a layout tree to markup.
///
/// Only registered types get an import line: the import path comes from the
/// type's registry entry, and an unknown type has none.
pub fn serialize_layout(tree: &LayoutTree, registry: &ComponentRegistry) -> String {
    let imports: Vec<String> = component_types(tree)
        .into_iter()
        .filter_map(|name| {
            registry.import_path_for(name).map(|path| format!("import {name} from \"{path}\";"))
        })
        .collect();

    let body = match tree.root() {
        Some(root) => Renderer { tree, registry }.render(root),
        None => {
            tracing::warn!("layout has no {ROOT_ID} node, body is empty");
            String::new()
        }
    };

    tracing::debug!(imports = imports.len(), nodes = tree.len(), "serialized layout");
    format!("{}\n\n{}", imports.join("\n"), body)
}

/// Distinct component names reachable from the root, in first-encounter
/// order of a depth-first walk. The root's own type is not included.
pub fn component_types(tree: &LayoutTree) -> Vec<&str> {
    let mut seen_types = HashSet::new();
    let mut types = Vec::new();
    let mut visited = HashSet::from([ROOT_ID]);

    let Some(root) = tree.root() else {
        return types;
    };

    let mut stack: Vec<&str> = root.nodes.iter().rev().map(String::as_str).collect();
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = tree.get(id) else {
            continue;
        };
        let name = node.component_name();
        if seen_types.insert(name) {
            types.push(name);
        }
        stack.extend(node.nodes.iter().rev().map(String::as_str));
    }

    types
}

struct Renderer<'a> {
    tree: &'a LayoutTree,
    registry: &'a ComponentRegistry,
}

/// Pending rendering work. Trees are walked with an explicit stack, so
/// nesting depth is bounded by memory rather than the call stack.
enum Step<'a> {
    Enter(&'a str),
    Close { id: &'a str, name: &'a str },
}

impl<'a> Renderer<'a> {
    /// Render the root's children, one markup line per entry.
    fn render(&self, root: &'a LayoutNode) -> String {
        let mut lines = Vec::new();
        // Ids of the containers currently open, the root included.
        let mut open = HashSet::from([ROOT_ID]);
        let mut stack: Vec<Step<'a>> =
            root.nodes.iter().rev().map(|id| Step::Enter(id.as_str())).collect();

        while let Some(step) = stack.pop() {
            match step {
                Step::Close { id, name } => {
                    open.remove(id);
                    lines.push(format!("</{name}>"));
                }
                Step::Enter(id) => {
                    if open.contains(id) {
                        tracing::warn!(node = id, "cycle in layout tree");
                        lines.push(format!("<!-- Cycle at node: {id} -->"));
                        continue;
                    }
                    let Some(node) = self.tree.get(id) else {
                        tracing::warn!(node = id, "child id not found in layout");
                        lines.push(format!("<!-- Missing node: {id} -->"));
                        continue;
                    };

                    let name = node.component_name();
                    let descriptor = match self.registry.resolve(name) {
                        Resolved::Known(descriptor) => descriptor,
                        Resolved::Unknown(name) => {
                            tracing::warn!(node = id, component = name, "unknown component type");
                            lines.push(format!("<!-- Unknown component: {name} -->"));
                            continue;
                        }
                    };

                    let attrs = render_props(&node.props);
                    if !descriptor.accepts_children {
                        lines.push(format!("<{name}{attrs} />"));
                    } else if node.nodes.is_empty() {
                        lines.push(format!("<{name}{attrs}></{name}>"));
                    } else {
                        lines.push(format!("<{name}{attrs}>"));
                        open.insert(id);
                        stack.push(Step::Close { id, name });
                        stack.extend(node.nodes.iter().rev().map(|c| Step::Enter(c.as_str())));
                    }
                }
            }
        }

        lines.join("\n")
    }
}

/// Render properties as attributes, each with a leading space.
///
/// Strings become `name="value"` with `"` escaped as `\"`; every other value
/// becomes `name={json}`.
fn render_props(props: &Map<String, Value>) -> String {
    props
        .iter()
        .map(|(name, value)| match value {
            Value::String(s) => format!(" {name}=\"{}\"", s.replace('"', "\\\"")),
            other => format!(" {name}={{{other}}}"),
        })
        .collect()
}
