//! Show one template with its URLs

use super::open_catalog;
use crate::output::template_details;
use anyhow::{bail, Context, Result};
use console::style;
use invite_gallery::config::GalleryConfig;

/// Show a template by id
#[derive(Debug, Clone, Copy)]
pub struct ShowCommand {
    /// Template id
    pub id: u64,
}

impl ShowCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or has no such id.
    pub async fn execute(&self, config: &GalleryConfig) -> Result<()> {
        let catalog = open_catalog(config)?;
        let Some(template) = catalog
            .get_template_by_id(self.id)
            .await
            .context("Failed to load templates")?
        else {
            bail!("Template {} not found", self.id);
        };

        for (label, value) in template_details(&template) {
            println!("{:>14} {}", style(format!("{label}:")).bold(), value);
        }

        Ok(())
    }
}
