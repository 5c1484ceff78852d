//! Error types and error handling
//!
//! [`GalleryError`] is the HTTP-facing taxonomy. Lower layers keep their own
//! error types ([`LoadError`], [`ServeError`]) and are translated here so that
//! every entry point reports the same status and body for the same failure.

use crate::catalog::LoadError;
use crate::serving::ServeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Framework error type
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Missing or malformed request parameter (400)
    #[error("{0}")]
    Validation(String),

    /// Path fails the containment or extension check (403)
    #[error("Access denied")]
    AccessDenied,

    /// Requested resource does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Request method is not supported by the route (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The template catalog could not be loaded (502)
    #[error("Failed to load templates")]
    Load(#[from] LoadError),

    /// Unexpected failure (500); `detail` is only sent outside production
    #[error("Internal server error")]
    Internal {
        /// Diagnostic text, withheld from clients in production
        detail: Option<String>,
    },
}

impl GalleryError {
    /// Translate a serving failure, keeping I/O detail only if `expose_details`
    #[must_use]
    pub fn from_serve(error: ServeError, expose_details: bool) -> Self {
        match error {
            ServeError::Forbidden(_) => Self::AccessDenied,
            ServeError::NotFound(_) => Self::NotFound("Template not found".to_string()),
            ServeError::Io(e) => {
                tracing::error!(error = %e, "Error serving template");
                Self::Internal {
                    detail: expose_details.then(|| e.to_string()),
                }
            }
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Load(_) => StatusCode::BAD_GATEWAY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Internal { detail } => ErrorBody {
                error: "Internal server error".to_string(),
                message: detail,
            },
            Self::Load(ref e) => {
                tracing::error!(error = %e, "Catalog unavailable");
                ErrorBody {
                    error: self.to_string(),
                    message: None,
                }
            }
            other => ErrorBody {
                error: other.to_string(),
                message: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
