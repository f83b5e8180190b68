use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::layout::ComponentRegistry;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub registry: ComponentRegistry,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Directory holding the site's content documents.
    pub content_root: String,
    /// Directory holding saved layout JSON. Defaults to `{{content_root}}/layouts`.
    pub layout_dir: Option<String>,
    /// Folders to skip when scanning (relative to content_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub content_root: PathBuf,
    pub layout_dir: PathBuf,
    /// Folders to skip when scanning (resolved to absolute paths).
    pub excluded_folders: Vec<PathBuf>,
    pub registry: ComponentRegistry,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// Settings used when no config file exists: the current directory as
    /// content root, an empty registry, and default logging.
    pub fn standalone() -> Self {
        let content_root = PathBuf::from(".");
        Self {
            active_profile: "(none)".to_string(),
            layout_dir: content_root.join("layouts"),
            content_root,
            excluded_folders: Vec::new(),
            registry: ComponentRegistry::default(),
            logging: LoggingConfig::default(),
        }
    }
}
