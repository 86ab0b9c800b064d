use std::path::Path;

use anyhow::Result;

use kisskh::config::config_path;
use kisskh::ExtensionConfig;

pub fn cmd_config(config: &ExtensionConfig, explicit: Option<&Path>) -> Result<()> {
    let path = explicit.map_or_else(config_path, Path::to_path_buf);
    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    eprintln!("# {}{state}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
