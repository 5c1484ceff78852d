//! JSON handlers over the template catalog
//!
//! Every handler goes through the shared [`crate::catalog::TemplateCatalog`],
//! so the first request after startup (or after a cache clear) triggers the
//! single load and concurrent requests wait on it.
//!
//! ```rust,ignore
//! let api = Router::new()
//!     .route("/api/templates", get(catalog::list_templates))
//!     .route("/api/templates/search", get(catalog::search_templates))
//!     .route("/api/templates/{id}", get(catalog::get_template))
//!     .route("/api/templates/by-title/{title}", get(catalog::get_template_by_title));
//! ```

use crate::catalog::{Template, TemplatePage};
use crate::error::GalleryError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

/// Pagination query for the listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<usize>,
    /// Items per page (default from configuration)
    pub page_size: Option<usize>,
}

/// Search query
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive keyword
    #[serde(default)]
    pub q: String,
}

/// Search results
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Keyword as received
    pub query: String,
    /// Matching templates in catalog order
    pub results: Vec<Template>,
    /// Number of results
    pub count: usize,
}

/// `GET /api/templates?page=&page_size=`
///
/// # Errors
///
/// `502` if the catalog cannot be loaded.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TemplatePage>, GalleryError> {
    let page = query.page.unwrap_or(1);
    let page_size = query
        .page_size
        .unwrap_or(state.config().catalog.page_size);

    let result = state.catalog().get_templates_by_page(page, page_size).await?;
    Ok(Json(result))
}

/// `GET /api/templates/search?q=`
///
/// A blank keyword returns no results without loading the catalog.
///
/// # Errors
///
/// `502` if the catalog cannot be loaded.
pub async fn search_templates(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, GalleryError> {
    let results = if query.q.trim().is_empty() {
        Vec::new()
    } else {
        state.catalog().search_templates(&query.q).await?
    };

    Ok(Json(SearchResponse {
        count: results.len(),
        query: query.q,
        results,
    }))
}

/// `GET /api/templates/{id}`
///
/// # Errors
///
/// `404` for an unknown id, `502` if the catalog cannot be loaded.
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Template>, GalleryError> {
    state
        .catalog()
        .get_template_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| GalleryError::NotFound(format!("Template {id} not found")))
}

/// `GET /api/templates/by-title/{title}`
///
/// # Errors
///
/// `404` when no title matches, `502` if the catalog cannot be loaded.
pub async fn get_template_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Template>, GalleryError> {
    state
        .catalog()
        .get_template_by_title(&title)
        .await?
        .map(Json)
        .ok_or_else(|| GalleryError::NotFound(format!("Template \"{title}\" not found")))
}
