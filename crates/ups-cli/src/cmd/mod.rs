//! Command implementations

pub mod app;
pub mod config;
pub mod variant;

use anyhow::{Context, Result};
use std::path::PathBuf;
use ups_core::{ClientConfig, UpsClient};

use crate::GlobalArgs;

/// Config file in effect: `--config`, else `~/.ups-admin/config.toml`.
pub fn config_file(global: &GlobalArgs) -> Option<PathBuf> {
    global.config.clone().or_else(ups_core::paths::config_path)
}

/// Load the config file and layer environment and flag overrides on top.
///
/// An explicit `--config` must exist; the default location may be absent.
pub fn resolve_config(global: &GlobalArgs) -> Result<ClientConfig> {
    let mut config = match (&global.config, config_file(global)) {
        (Some(path), _) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        (None, Some(path)) => ClientConfig::load_or_default(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        (None, None) => ClientConfig::default(),
    };

    apply_overrides(&mut config, global);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn apply_overrides(config: &mut ClientConfig, global: &GlobalArgs) {
    if let Some(url) = &global.url {
        config.base_url.clone_from(url);
    }
    if let Some(page_size) = global.page_size {
        config.page_size = page_size;
    }
    if let Some(timeout) = global.timeout {
        config.timeout_secs = timeout;
    }
}

/// Build an HTTP client from the resolved configuration.
pub fn connect(global: &GlobalArgs) -> Result<UpsClient> {
    let config = resolve_config(global)?;
    tracing::debug!(
        "Using {} (page size {}, timeout {}s)",
        config.base_url,
        config.page_size,
        config.timeout_secs
    );
    UpsClient::from_config(&config).context("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://file:8080/rest\"\npage_size = 25").unwrap();

        let global = GlobalArgs {
            config: Some(file.path().to_path_buf()),
            page_size: Some(5),
            ..GlobalArgs::default()
        };
        let config = resolve_config(&global).unwrap();
        assert_eq!(config.base_url, "http://file:8080/rest");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            config: Some(dir.path().join("missing.toml")),
            ..GlobalArgs::default()
        };
        assert!(resolve_config(&global).is_err());
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut config = ClientConfig::default();
        let global = GlobalArgs {
            url: Some("localhost:8080".to_string()),
            ..GlobalArgs::default()
        };
        apply_overrides(&mut config, &global);
        assert_eq!(config.base_url, "localhost:8080");
        assert!(config.validate().is_err());
    }
}
