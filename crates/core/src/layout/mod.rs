//! Visual layout trees: data model, component registry, markup
//! serialization, and integrity checks.
//!
//! A layout is a flat map of nodes keyed by id. Each node names a component
//! type, carries ordered properties, and lists its children by id. The tree
//! hangs off the reserved `ROOT` id.

pub mod integrity;
pub mod registry;
pub mod serializer;
pub mod types;

pub use integrity::{
    IntegrityReport, check_layout, check_layout_json, check_layout_value, check_tree,
};
pub use registry::{ComponentDescriptor, ComponentRegistry, Resolved};
pub use serializer::{component_types, serialize_layout};
pub use types::{
    ComponentRef, LayoutError, LayoutNode, LayoutTree, PAGE_COMPONENT, ROOT_ID, parse_layout,
};
