//! Page through the catalog

use super::open_catalog;
use crate::output::{page_summary, table_header, template_row, RULE_WIDTH};
use anyhow::{Context, Result};
use console::style;
use invite_gallery::config::GalleryConfig;

/// List one page of templates
#[derive(Debug, Clone, Default)]
pub struct ListCommand {
    /// 1-based page number
    pub page: usize,
    /// Page size override
    pub page_size: Option<usize>,
}

impl ListCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub async fn execute(&self, config: &GalleryConfig) -> Result<()> {
        let page_size = self.page_size.unwrap_or(config.catalog.page_size);
        let catalog = open_catalog(config)?;
        let page = catalog
            .get_templates_by_page(self.page, page_size)
            .await
            .context("Failed to load templates")?;

        println!("{}", style(table_header()).bold());
        println!("{}", "─".repeat(RULE_WIDTH));
        if page.templates.is_empty() {
            println!("  {}", style("(No templates on this page)").dim());
        }
        for template in &page.templates {
            println!("{}", template_row(template));
        }
        println!("{}", "─".repeat(RULE_WIDTH));
        println!("{}", style(page_summary(&page)).dim());

        Ok(())
    }
}
