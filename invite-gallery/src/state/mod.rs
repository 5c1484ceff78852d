//! Application state management
//!
//! Holds the configuration, the shared [`TemplateCatalog`] handle and the
//! [`TemplateServer`]. Construct it once at startup and hand it to the router.

use crate::{
    catalog::{TemplateCatalog, TemplateSource},
    config::GalleryConfig,
    serving::TemplateServer,
};
use std::sync::Arc;

/// Application state for invite-gallery
///
/// # Example
///
/// ```rust,no_run
/// use invite_gallery::{config::GalleryConfig, state::AppState};
///
/// # fn example() -> anyhow::Result<()> {
/// let state = AppState::from_config(GalleryConfig::load()?)?;
///
/// let app = invite_gallery::router::build(state);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<GalleryConfig>,
    catalog: TemplateCatalog,
    server: Arc<TemplateServer>,
}

impl AppState {
    /// Create state with the catalog source described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured template source cannot be built.
    pub fn from_config(config: GalleryConfig) -> anyhow::Result<Self> {
        let source = config.catalog.source()?;
        Ok(Self::with_source(config, source))
    }

    /// Create state with an explicit catalog source
    #[must_use]
    pub fn with_source(config: GalleryConfig, source: Arc<dyn TemplateSource>) -> Self {
        let server = config.templates.server();
        Self {
            catalog: TemplateCatalog::from_source(source),
            server: Arc::new(server),
            config: Arc::new(config),
        }
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Shared catalog handle
    #[must_use]
    pub const fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Template file server
    #[must_use]
    pub fn server(&self) -> &TemplateServer {
        &self.server
    }

    /// Shared handle to the template file server
    #[must_use]
    pub fn shared_server(&self) -> Arc<TemplateServer> {
        Arc::clone(&self.server)
    }

    /// Whether internal error details may be sent to clients
    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        !self.config.server.environment.is_production()
    }
}
