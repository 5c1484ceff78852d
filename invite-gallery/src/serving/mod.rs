//! Confined static serving of template documents
//!
//! All template file delivery goes through [`serve`] (or
//! [`TemplateServer::serve`], which carries a non-default [`ServePolicy`]).
//! The HTTP entry points are thin adapters over it:
//!
//! - [`crate::handlers::template::serve_template_api`]: `GET /api/template?url=...`
//! - [`crate::middleware::RawTemplatesLayer`]: development-time interception
//!
//! A request is accepted only when it names a document under the template
//! marker with a recognized extension, and both the lexically normalized path
//! and the canonical path of the existing file lie under the root directory.
//!
//! # Examples
//!
//! ```rust,no_run
//! use invite_gallery::serving::{serve, ServeError};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! match serve(Path::new("./public"), "/templates/T01/index.html").await {
//!     Ok(template) => println!("{} bytes of {}", template.body.len(), template.content_type),
//!     Err(ServeError::NotFound(path)) => println!("missing: {path}"),
//!     Err(other) => return Err(other.into()),
//! }
//! # Ok(())
//! # }
//! ```

use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use http::{
    header::{
        ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE,
        X_CONTENT_TYPE_OPTIONS,
    },
    StatusCode,
};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Rules a requested path must satisfy before touching the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServePolicy {
    /// Substring every servable path must contain
    pub path_marker: String,

    /// Accepted file extensions, without the leading dot (case-sensitive)
    pub extensions: Vec<String>,

    /// `max-age` advertised in `Cache-Control`, in seconds
    pub cache_max_age: u32,
}

impl Default for ServePolicy {
    fn default() -> Self {
        Self {
            path_marker: "/templates/".to_string(),
            extensions: vec!["html".to_string()],
            cache_max_age: 3600,
        }
    }
}

impl ServePolicy {
    /// Whether `path` names a template document by marker and extension
    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        path.contains(&self.path_marker)
            && self.extensions.iter().any(|ext| {
                path.strip_suffix(ext.as_str())
                    .is_some_and(|stem| stem.ends_with('.'))
            })
    }
}

/// A template document read from disk, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedTemplate {
    /// MIME type derived from the file extension
    pub content_type: String,

    /// Raw file contents
    pub body: Vec<u8>,

    /// `max-age` for `Cache-Control`, in seconds
    pub cache_max_age: u32,
}

impl IntoResponse for ServedTemplate {
    fn into_response(self) -> Response {
        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, &self.content_type)
            .header(CONTENT_LENGTH, self.body.len())
            .header(
                CACHE_CONTROL,
                format!("public, max-age={}", self.cache_max_age),
            )
            .header(X_CONTENT_TYPE_OPTIONS, "nosniff")
            .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
            .body(Body::from(self.body))
            .unwrap_or_else(|_| Response::new(Body::empty()))
    }
}

/// Why a template could not be served
#[derive(Debug, Error)]
pub enum ServeError {
    /// Wrong marker or extension, or the path escapes the root
    #[error("access denied: {0}")]
    Forbidden(String),

    /// Nothing exists at the resolved path
    #[error("template not found: {0}")]
    NotFound(String),

    /// Unexpected I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Template root plus the policy applied to every request
#[derive(Debug, Clone)]
pub struct TemplateServer {
    root: PathBuf,
    policy: ServePolicy,
}

impl TemplateServer {
    /// Serve from `root` with the default policy
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: ServePolicy::default(),
        }
    }

    /// Replace the policy
    #[must_use]
    pub fn with_policy(mut self, policy: ServePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Directory outside of which nothing is read
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Active policy
    #[must_use]
    pub const fn policy(&self) -> &ServePolicy {
        &self.policy
    }

    /// Serve `requested` (a URL path, optionally with a query string)
    ///
    /// # Errors
    ///
    /// See [`serve_with`].
    pub async fn serve(&self, requested: &str) -> Result<ServedTemplate, ServeError> {
        serve_with(&self.root, requested, &self.policy).await
    }
}

/// Serve `requested` from `root` with the default [`ServePolicy`]
///
/// # Errors
///
/// See [`serve_with`].
pub async fn serve(root: &Path, requested: &str) -> Result<ServedTemplate, ServeError> {
    serve_with(root, requested, &ServePolicy::default()).await
}

/// Serve `requested` from `root` under `policy`
///
/// # Errors
///
/// - [`ServeError::Forbidden`] if the path contains a NUL byte, fails the
///   policy or resolves outside `root`
/// - [`ServeError::NotFound`] if no file exists at the resolved path
/// - [`ServeError::Io`] for any other filesystem failure
pub async fn serve_with(
    root: &Path,
    requested: &str,
    policy: &ServePolicy,
) -> Result<ServedTemplate, ServeError> {
    let path = strip_query(requested);

    if path.contains('\0') {
        tracing::warn!(path, "Rejected template request containing NUL");
        return Err(ServeError::Forbidden(path.to_string()));
    }

    if !policy.accepts(path) {
        tracing::warn!(path, "Rejected template request outside policy");
        return Err(ServeError::Forbidden(path.to_string()));
    }

    let root = normalize(&std::path::absolute(root)?);
    let candidate = normalize(&root.join(path.trim_start_matches('/')));

    if !candidate.starts_with(&root) {
        tracing::warn!(path, "Rejected template request escaping root");
        return Err(ServeError::Forbidden(path.to_string()));
    }

    match tokio::fs::metadata(&candidate).await {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Err(ServeError::NotFound(path.to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path, "Template not found");
            return Err(ServeError::NotFound(path.to_string()));
        }
        Err(e) => return Err(ServeError::Io(e)),
    }

    // Symlinks inside the tree may still point elsewhere
    let canonical_root = tokio::fs::canonicalize(&root).await?;
    let canonical = tokio::fs::canonicalize(&candidate).await?;
    if !canonical.starts_with(&canonical_root) {
        tracing::warn!(path, "Rejected template request resolving outside root");
        return Err(ServeError::Forbidden(path.to_string()));
    }

    let body = tokio::fs::read(&canonical).await?;

    Ok(ServedTemplate {
        content_type: content_type_for(&canonical),
        body,
        cache_max_age: policy.cache_max_age,
    })
}

/// Drop any `?query` or `#fragment` suffix
fn strip_query(requested: &str) -> &str {
    requested
        .split(['?', '#'])
        .next()
        .unwrap_or(requested)
}

/// Collapse `.` and `..` segments without touching the filesystem
///
/// `..` never climbs above the path's root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
        }
    }
    normalized
}

/// MIME type from the extension; text types are declared UTF-8
fn content_type_for(path: &Path) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_().as_str() == "text" && mime.get_param("charset").is_none() {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}
