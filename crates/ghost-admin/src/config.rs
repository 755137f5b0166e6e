//! Client configuration.
//!
//! Values can come from a TOML file and from overrides (command line or
//! environment). [`PartialConfig`] holds whatever was supplied by one
//! source; [`PartialConfig::build`] validates the merged result into a
//! [`ClientConfig`].
//!
//! ```toml
//! url = "https://blog.example.com"
//! admin_api_key = "6489a7c1d2e3f4a5b6c7d8e9:a1b2..."
//! version = "v5.0"
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::key::AdminApiKey;
use crate::{Error, Result};

/// Admin API version sent in `Accept-Version` when none is configured
pub const DEFAULT_API_VERSION: &str = "v5.0";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the Admin API below the site root
const ADMIN_API_PATH: &str = "ghost/api/admin/";

/// Configuration values from a single source, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub url: Option<String>,
    pub admin_api_key: Option<String>,
    pub version: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl PartialConfig {
    /// Load values from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Overlay `overrides` on top of `self`; supplied override values win.
    pub fn merge(self, overrides: PartialConfig) -> PartialConfig {
        PartialConfig {
            url: overrides.url.or(self.url),
            admin_api_key: overrides.admin_api_key.or(self.admin_api_key),
            version: overrides.version.or(self.version),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Validate into a usable client configuration.
    pub fn build(self) -> Result<ClientConfig> {
        let url = self.url.ok_or_else(|| Error::Config {
            message: "Ghost site URL is required".to_string(),
        })?;
        let key = self.admin_api_key.ok_or_else(|| Error::Config {
            message: "Admin API key is required".to_string(),
        })?;

        Ok(ClientConfig {
            api_base: admin_api_base(&url)?,
            key: key.parse()?,
            version: self
                .version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Validated configuration for [`crate::AdminClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Admin API root, always ending in `/ghost/api/admin/`
    pub api_base: Url,
    pub key: AdminApiKey,
    pub version: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: &str, key: &str) -> Result<Self> {
        PartialConfig {
            url: Some(url.to_string()),
            admin_api_key: Some(key.to_string()),
            ..Default::default()
        }
        .build()
    }
}

/// Resolve the Admin API root for a site URL.
///
/// Sites served below a path (`https://example.com/blog`) keep that path.
fn admin_api_base(site: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidUrl {
        url: site.to_string(),
        reason,
    };

    let mut url = Url::parse(site.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    url.join(ADMIN_API_PATH).map_err(|e| invalid(e.to_string()))
}
