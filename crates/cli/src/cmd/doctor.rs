use color_eyre::eyre::Result;
use folio_core::config::loader::{ConfigLoader, default_config_path};
use std::path::Path;
use std::process::ExitCode;

pub fn run(config: Option<&Path>, profile: Option<&str>) -> Result<ExitCode> {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            println!("OK   folio doctor (folio-core {})", folio_core::version());
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("content_root: {}", rc.content_root.display());
            println!("layout_dir: {}", rc.layout_dir.display());
            println!("registry.import_template: {}", rc.registry.import_template);
            println!("registry.components: {}", rc.registry.len());
            for (name, descriptor) in &rc.registry.components {
                let kind = if descriptor.accepts_children { "container" } else { "leaf" };
                let path = rc.registry.import_path_for(name).unwrap_or_default();
                println!("  {name} ({kind}) -> {path}");
            }
            println!("logging.level: {}", rc.logging.level);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("FAIL folio doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
