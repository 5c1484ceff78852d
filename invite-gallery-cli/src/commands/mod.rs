//! CLI command implementations

pub mod list;
pub mod search;
pub mod serve;
pub mod show;

pub use list::ListCommand;
pub use search::SearchCommand;
pub use serve::ServeCommand;
pub use show::ShowCommand;

use anyhow::{Context, Result};
use invite_gallery::{catalog::TemplateCatalog, config::GalleryConfig};

/// Catalog over the source described by `config`
pub(crate) fn open_catalog(config: &GalleryConfig) -> Result<TemplateCatalog> {
    let source = config
        .catalog
        .source()
        .context("Failed to create template source")?;
    Ok(TemplateCatalog::from_source(source))
}
