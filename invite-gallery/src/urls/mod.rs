//! Client-facing URLs for template documents and preview images

use serde::Serialize;

/// Route of the confined template API
pub const TEMPLATE_API_PATH: &str = "/api/template";

/// Direct URL plus the API route to retry through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateUrls {
    /// Static path served straight from the public directory
    pub primary: String,
    /// Same document through `/api/template`
    pub fallback: String,
}

/// Root-relative path for a template document
#[must_use]
pub fn template_url(path: &str) -> String {
    with_leading_slash(path)
}

/// Root-relative path for a preview image
#[must_use]
pub fn image_url(path: &str) -> String {
    with_leading_slash(path)
}

/// API route for a template document, with the path percent-encoded
#[must_use]
pub fn template_api_url(path: &str) -> String {
    let path = with_leading_slash(path);
    format!("{TEMPLATE_API_PATH}?url={}", urlencoding::encode(&path))
}

/// Direct URL first, API route as fallback
#[must_use]
pub fn fallback_urls(path: &str) -> TemplateUrls {
    TemplateUrls {
        primary: template_url(path),
        fallback: template_api_url(path),
    }
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
