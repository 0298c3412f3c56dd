use dirs::home_dir;
use std::path::PathBuf;

/// Returns the configuration directory, or None if the user's home cannot be resolved.
///
/// `UPS_ADMIN_HOME` overrides the default of `~/.ups-admin`.
pub fn try_ups_admin_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("UPS_ADMIN_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".ups-admin"))
}

/// Config file path: ~/.ups-admin/config.toml
pub fn config_path() -> Option<PathBuf> {
    try_ups_admin_home().map(|home| home.join("config.toml"))
}
