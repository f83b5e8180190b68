//! Component type registry consulted by the layout serializer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder substituted with the component name in import templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// How a registered component type is rendered and imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Whether the component renders its children between open and close tags.
    #[serde(default)]
    pub accepts_children: bool,
    /// Explicit import path; falls back to the registry template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,
}

impl ComponentDescriptor {
    pub fn container() -> Self {
        Self { accepts_children: true, import_path: None }
    }

    pub fn leaf() -> Self {
        Self { accepts_children: false, import_path: None }
    }

    pub fn at(mut self, import_path: &str) -> Self {
        self.import_path = Some(import_path.to_string());
        self
    }
}

/// Outcome of looking a component type up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Known(&'a ComponentDescriptor),
    Unknown(&'a str),
}

/// Registry of component types, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRegistry {
    /// Import path template, `{name}` is replaced with the component name.
    #[serde(default = "default_import_template")]
    pub import_template: String,
    #[serde(default)]
    pub components: BTreeMap<String, ComponentDescriptor>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self { import_template: default_import_template(), components: BTreeMap::new() }
    }
}

fn default_import_template() -> String {
    "../components/{name}.astro".to_string()
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.import_template = template.to_string();
        self
    }

    pub fn with(mut self, name: &str, descriptor: ComponentDescriptor) -> Self {
        self.register(name, descriptor);
        self
    }

    pub fn register(&mut self, name: &str, descriptor: ComponentDescriptor) {
        self.components.insert(name.to_string(), descriptor);
    }

    pub fn resolve<'a>(&'a self, name: &'a str) -> Resolved<'a> {
        match self.components.get(name) {
            Some(descriptor) => Resolved::Known(descriptor),
            None => Resolved::Unknown(name),
        }
    }

    /// Import path for a registered component, `None` when unknown.
    pub fn import_path_for(&self, name: &str) -> Option<String> {
        let descriptor = self.components.get(name)?;
        Some(match &descriptor.import_path {
            Some(path) => path.clone(),
            None => self.import_template.replace(NAME_PLACEHOLDER, name),
        })
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_and_unknown() {
        let reg = ComponentRegistry::new().with("Section", ComponentDescriptor::container());
        assert_eq!(reg.resolve("Section"), Resolved::Known(&ComponentDescriptor::container()));
        assert_eq!(reg.resolve("Nope"), Resolved::Unknown("Nope"));
    }

    #[test]
    fn import_path_uses_template_or_override() {
        let reg = ComponentRegistry::new()
            .with_template("@/blocks/{name}.astro")
            .with("Hero", ComponentDescriptor::leaf())
            .with("Map", ComponentDescriptor::leaf().at("astro-leaflet/Map.astro"));

        assert_eq!(reg.import_path_for("Hero").as_deref(), Some("@/blocks/Hero.astro"));
        assert_eq!(reg.import_path_for("Map").as_deref(), Some("astro-leaflet/Map.astro"));
        assert_eq!(reg.import_path_for("Ghost"), None);
    }

    #[test]
    fn deserialize_from_toml() {
        let reg: ComponentRegistry = toml::from_str(
            r#"
[components.Section]
accepts_children = true

[components.Heading]
"#,
        )
        .unwrap();
        assert_eq!(reg.import_template, "../components/{name}.astro");
        assert!(reg.components["Section"].accepts_children);
        assert!(!reg.components["Heading"].accepts_children);
    }
}
