//! Configuration management for invite-gallery
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `GALLERY_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/invite-gallery/config.toml` (user config, XDG)
//! 4. `/etc/invite-gallery/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Environment variable format: `GALLERY_SECTION__FIELD_NAME`, for example
//! `GALLERY_SERVER__PORT=8080` or `GALLERY_CATALOG__PAGE_SIZE=12`.
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! environment = "production"
//!
//! [catalog]
//! data_path = "./public/data.json"
//! page_size = 6
//! preload = true
//!
//! [templates]
//! public_dir = "./public"
//! path_marker = "/templates/"
//! extensions = ["html"]
//! cache_max_age_secs = 3600
//! ```

use crate::catalog::{FileTemplateSource, HttpTemplateSource, LoadError, TemplateSource};
use crate::serving::{ServePolicy, TemplateServer};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const APP_DIR: &str = "invite-gallery";

/// Deployment environment
///
/// Controls whether internal error details reach HTTP clients and whether the
/// development template interceptor is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    Development,
    /// Deployed service
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl Environment {
    /// Whether this is the production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Deployment environment
    pub environment: Environment,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: Environment::default(),
        }
    }
}

impl ServerSettings {
    /// `host:port` for binding
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Template catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Local `data.json`, used when `data_url` is unset
    pub data_path: PathBuf,

    /// Remote `data.json`; takes precedence over `data_path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,

    /// Default page size for catalog listings
    pub page_size: usize,

    /// Warm the catalog at startup
    pub preload: bool,

    /// Give up on a remote fetch after this many seconds (no limit if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./public/data.json"),
            data_url: None,
            page_size: 6,
            preload: true,
            fetch_timeout_secs: None,
        }
    }
}

impl CatalogSettings {
    /// Build the template source these settings describe
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for a remote source cannot be built.
    pub fn source(&self) -> Result<Arc<dyn TemplateSource>, LoadError> {
        let source: Arc<dyn TemplateSource> = match (&self.data_url, self.fetch_timeout_secs) {
            (Some(url), Some(secs)) => Arc::new(HttpTemplateSource::with_timeout(
                url.clone(),
                Duration::from_secs(secs),
            )?),
            (Some(url), None) => Arc::new(HttpTemplateSource::new(url.clone())),
            (None, _) => Arc::new(FileTemplateSource::new(self.data_path.clone())),
        };
        Ok(source)
    }
}

/// Static template serving settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Root of all static files; nothing outside it is served
    pub public_dir: PathBuf,

    /// Substring every template path must contain
    pub path_marker: String,

    /// Servable document extensions
    pub extensions: Vec<String>,

    /// `Cache-Control` max-age for template responses
    pub cache_max_age_secs: u32,

    /// Intercept template paths in development, bypassing other processing
    pub raw_dev_serving: bool,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        let policy = ServePolicy::default();
        Self {
            public_dir: PathBuf::from("./public"),
            path_marker: policy.path_marker,
            extensions: policy.extensions,
            cache_max_age_secs: policy.cache_max_age,
            raw_dev_serving: true,
        }
    }
}

impl TemplateSettings {
    /// Serving policy described by these settings
    #[must_use]
    pub fn policy(&self) -> ServePolicy {
        ServePolicy {
            path_marker: self.path_marker.clone(),
            extensions: self.extensions.clone(),
            cache_max_age: self.cache_max_age_secs,
        }
    }

    /// Template server rooted at `public_dir`
    #[must_use]
    pub fn server(&self) -> TemplateServer {
        TemplateServer::new(self.public_dir.clone()).with_policy(self.policy())
    }
}

/// Complete invite-gallery configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GalleryConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Template serving settings
    #[serde(default)]
    pub templates: TemplateSettings,
}

impl GalleryConfig {
    /// Load configuration from every standard location
    ///
    /// Precedence, highest first:
    /// 1. Environment variables (`GALLERY_*`, use `__` for nesting)
    /// 2. `./config.toml`
    /// 3. `~/.config/invite-gallery/config.toml`
    /// 4. `/etc/invite-gallery/config.toml`
    /// 5. Defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a present configuration file is invalid or a value
    /// has the wrong type.
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let system_config = PathBuf::from("/etc").join(APP_DIR).join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        figment = figment.merge(Env::prefixed("GALLERY_").split("__").lowercase(true));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file, overridden by environment
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or a value has the
    /// wrong type.
    pub fn load_from(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.into()))
            .merge(Env::prefixed("GALLERY_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Recommended per-user config path
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join(APP_DIR).join("config.toml"),
        )
    }
}
