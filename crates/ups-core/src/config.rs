//! Client configuration loaded from `config.toml`.
//!
//! ```toml
//! base_url = "http://localhost:8080/rest"
//! page_size = 25
//! timeout_secs = 10
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/rest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// REST root of the server, e.g. `http://localhost:8080/rest`.
    pub base_url: String,
    /// Items requested per list page.
    pub page_size: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: crate::UpsClient::DEFAULT_PAGE_SIZE.get(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on syntax errors or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Load from a file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::load`] for files that exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check the values make a usable client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        self.page_size()?;
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Page size as a non-zero count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the page size is zero.
    pub fn page_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.page_size)
            .ok_or_else(|| Error::Config("page_size must be at least 1".to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
