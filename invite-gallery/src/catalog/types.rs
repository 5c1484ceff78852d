//! Catalog records and derived views

use serde::{Deserialize, Serialize};

/// A single invitation template
///
/// `url` points at the rendered HTML document and `image` at its preview
/// asset. The remaining fields are presentational and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Stable identifier, unique within the catalog
    pub id: u64,

    /// Display title (e.g. `T01`)
    pub title: String,

    /// Path to the HTML document
    pub url: String,

    /// Path to the preview image
    pub image: String,

    /// Visual style tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Category tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Dominant color tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Template {
    /// Create a template with only the required fields set
    pub fn new(
        id: u64,
        title: impl Into<String>,
        url: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            image: image.into(),
            style: None,
            category: None,
            color: None,
        }
    }

    /// Case-insensitive substring match against title or url
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.url.to_lowercase().contains(needle)
    }
}

/// Shape of the `data.json` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    /// Templates in source order
    pub templates: Vec<Template>,
}

/// One page of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePage {
    /// Templates on this page
    pub templates: Vec<Template>,

    /// Size of the whole catalog, regardless of the page bounds
    pub total: usize,

    /// Requested page (1-based)
    pub page: usize,

    /// Requested page size
    pub page_size: usize,

    /// Number of pages needed to show the whole catalog
    pub total_pages: usize,

    /// Whether any template lies after this page
    pub has_more: bool,
}

impl TemplatePage {
    /// Slice `all` into page `page` of `page_size` records
    ///
    /// Pages are 1-based. A page outside the catalog, a zero page, or a zero
    /// page size yields an empty slice; `total` always reports `all.len()`.
    #[must_use]
    pub fn slice(all: &[Template], page: usize, page_size: usize) -> Self {
        let total = all.len();
        let start = page
            .checked_sub(1)
            .and_then(|index| index.checked_mul(page_size));

        let templates = match start {
            Some(start) if page_size > 0 && start < total => {
                let end = start.saturating_add(page_size).min(total);
                all[start..end].to_vec()
            }
            _ => Vec::new(),
        };

        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        let has_more = page
            .checked_mul(page_size)
            .is_some_and(|seen| page_size > 0 && seen < total);

        Self {
            templates,
            total,
            page,
            page_size,
            total_pages,
            has_more,
        }
    }
}

/// Observable state of the catalog cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CatalogStatus {
    /// Nothing loaded and no load in flight
    Empty,
    /// A load is in flight
    Loading,
    /// Templates are cached
    Loaded {
        /// Number of cached templates
        count: usize,
    },
}
