use anyhow::{Context, Result};

use super::{config_file, resolve_config};
use crate::{GlobalArgs, ui};

/// Print the configuration after every override has been applied.
pub fn show(global: &GlobalArgs) -> Result<()> {
    let config = resolve_config(global)?;
    if global.json {
        return ui::print_json(&config);
    }

    match config_file(global) {
        Some(path) if path.exists() => println!("# from {}", path.display()),
        Some(path) => println!("# {} not found, using defaults", path.display()),
        None => println!("# no home directory, using defaults"),
    }
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
