//! invite-gallery: catalog and confined static serving for invitation templates
//!
//! Pre-rendered invitation templates live under a public directory as plain
//! HTML documents, described by a JSON catalog (`data.json`). This crate
//! provides:
//!
//! - **Catalog**: a lazily loaded, single-flight cached view of the template
//!   list with lookup, search and pagination ([`catalog::TemplateCatalog`])
//! - **Serving**: path-confined delivery of template documents
//!   ([`serving::serve`]), exposed through `/api/template` and a
//!   development-time interceptor
//! - **HTTP surface**: a catalog JSON API, health probes and static files
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use invite_gallery::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GalleryConfig::load()?;
//!     observability::init(&ObservabilityConfig::for_environment(
//!         config.server.environment,
//!     ))?;
//!
//!     let state = AppState::from_config(config)?;
//!     router::serve(state).await
//! }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod observability;
pub mod router;
pub mod serving;
pub mod state;
pub mod urls;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use invite_gallery::prelude::*;
    //! ```

    pub use crate::catalog::{
        CatalogStatus, FileTemplateSource, HttpTemplateSource, LoadError, Template,
        TemplateCatalog, TemplateData, TemplatePage, TemplateSource,
    };
    pub use crate::config::{Environment, GalleryConfig};
    pub use crate::error::GalleryError;
    pub use crate::middleware::RawTemplatesLayer;
    pub use crate::observability::{self, ObservabilityConfig};
    pub use crate::router;
    pub use crate::serving::{serve, ServeError, ServePolicy, ServedTemplate, TemplateServer};
    pub use crate::state::AppState;
    pub use crate::urls::{fallback_urls, template_api_url, TemplateUrls};
}
