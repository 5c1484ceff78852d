//! `GET /api/template?url=<path>`
//!
//! Thin adapter over [`crate::serving`]: validates the query, then maps the
//! serving outcome onto [`GalleryError`].

use crate::error::GalleryError;
use crate::serving::ServedTemplate;
use crate::state::AppState;
use axum::extract::{Query, State};
use serde::Deserialize;

/// Query string of the template route
#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    /// Root-relative path of the requested document
    pub url: Option<String>,
}

/// Serve a template document named by the `url` query parameter
///
/// # Errors
///
/// `400` when `url` is missing or empty, otherwise the serving outcome
/// (`403`, `404`, `500`).
pub async fn serve_template_api(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Result<ServedTemplate, GalleryError> {
    let url = query
        .url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| GalleryError::Validation("Missing url parameter".to_string()))?;

    state
        .server()
        .serve(&url)
        .await
        .map_err(|e| GalleryError::from_serve(e, state.expose_error_details()))
}

/// Any method other than GET on the template route
#[allow(clippy::unused_async)]
pub async fn method_not_allowed() -> GalleryError {
    GalleryError::MethodNotAllowed
}
