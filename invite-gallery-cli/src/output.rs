//! Plain-text rendering of catalog data
//!
//! Functions here return unstyled strings; commands add color when printing.

use invite_gallery::catalog::{Template, TemplatePage};
use invite_gallery::urls::{fallback_urls, image_url};

/// Width of table rules
pub const RULE_WIDTH: usize = 72;

/// Column header matching [`template_row`]
#[must_use]
pub fn table_header() -> String {
    format!("{:<6} {:<20} {}", "ID", "Title", "URL")
}

/// One table row per template
#[must_use]
pub fn template_row(template: &Template) -> String {
    format!("{:<6} {:<20} {}", template.id, template.title, template.url)
}

/// Position summary under a page listing
#[must_use]
pub fn page_summary(page: &TemplatePage) -> String {
    let mut summary = format!(
        "Page {} of {} ({} templates)",
        page.page, page.total_pages, page.total
    );
    if page.has_more {
        summary.push_str(&format!(", next: --page {}", page.page + 1));
    }
    summary
}

/// Labelled fields of a single template, including its URLs
#[must_use]
pub fn template_details(template: &Template) -> Vec<(&'static str, String)> {
    let urls = fallback_urls(&template.url);
    let mut details = vec![
        ("ID", template.id.to_string()),
        ("Title", template.title.clone()),
        ("Image", image_url(&template.image)),
    ];

    for (label, value) in [
        ("Style", &template.style),
        ("Category", &template.category),
        ("Color", &template.color),
    ] {
        if let Some(value) = value {
            details.push((label, value.clone()));
        }
    }

    details.push(("Direct URL", urls.primary));
    details.push(("Fallback URL", urls.fallback));
    details
}
