//! Keyword search over titles and URLs

use super::open_catalog;
use crate::output::{table_header, template_row, RULE_WIDTH};
use anyhow::{Context, Result};
use console::style;
use invite_gallery::config::GalleryConfig;

/// Search templates by keyword
#[derive(Debug, Clone)]
pub struct SearchCommand {
    /// Case-insensitive keyword
    pub keyword: String,
}

impl SearchCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub async fn execute(&self, config: &GalleryConfig) -> Result<()> {
        if self.keyword.trim().is_empty() {
            println!("{}", style("No keyword given").yellow());
            return Ok(());
        }

        let catalog = open_catalog(config)?;
        let results = catalog
            .search_templates(&self.keyword)
            .await
            .context("Failed to load templates")?;

        if results.is_empty() {
            println!(
                "No templates match {}",
                style(&self.keyword).cyan()
            );
            return Ok(());
        }

        println!("{}", style(table_header()).bold());
        println!("{}", "─".repeat(RULE_WIDTH));
        for template in &results {
            println!("{}", template_row(template));
        }
        println!("{}", "─".repeat(RULE_WIDTH));
        println!(
            "{}",
            style(format!("{} match(es) for \"{}\"", results.len(), self.keyword)).dim()
        );

        Ok(())
    }
}
