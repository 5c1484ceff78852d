//! Development-time interception of raw template requests
//!
//! During local development the gallery links straight to
//! `/templates/<id>/index.html` rather than going through `/api/template`.
//! [`RawTemplatesLayer`] answers those requests with the same confinement
//! rules and status codes as the API route. Everything else reaches the
//! wrapped service untouched. The router wraps only its static fallback, so
//! matched API routes are never intercepted.
//!
//! # Example
//!
//! ```rust,no_run
//! # use invite_gallery::middleware::RawTemplatesLayer;
//! # use invite_gallery::serving::TemplateServer;
//! # use axum::Router;
//! # use std::sync::Arc;
//! # use tower::Layer;
//! # use tower_http::services::ServeDir;
//! # #[tokio::main]
//! # async fn main() {
//! let server = Arc::new(TemplateServer::new("./public"));
//! let app: Router<()> = Router::new()
//!     .fallback_service(RawTemplatesLayer::new(server, true).layer(ServeDir::new("./public")));
//! # }
//! ```

use crate::error::GalleryError;
use crate::serving::TemplateServer;
use axum::{
    body::Body,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use std::{future::Future, pin::Pin, sync::Arc, task::{Context, Poll}};
use tower::{Layer, Service};

/// Layer that serves template documents before the inner service sees them
#[derive(Clone, Debug)]
pub struct RawTemplatesLayer {
    server: Arc<TemplateServer>,
    expose_details: bool,
}

impl RawTemplatesLayer {
    /// Intercept with `server`; `expose_details` adds I/O detail to 500 bodies
    #[must_use]
    pub const fn new(server: Arc<TemplateServer>, expose_details: bool) -> Self {
        Self {
            server,
            expose_details,
        }
    }
}

impl<S> Layer<S> for RawTemplatesLayer {
    type Service = RawTemplatesMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RawTemplatesMiddleware {
            inner,
            server: Arc::clone(&self.server),
            expose_details: self.expose_details,
        }
    }
}

/// Service produced by [`RawTemplatesLayer`]
#[derive(Clone, Debug)]
pub struct RawTemplatesMiddleware<S> {
    inner: S,
    server: Arc<TemplateServer>,
    expose_details: bool,
}

impl<S> Service<Request<Body>> for RawTemplatesMiddleware<S>
where
    S: Service<Request<Body>> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let Some(path) = intercepted_path(&request, &self.server) else {
            let future = self.inner.call(request);
            return Box::pin(async move { future.await.map(IntoResponse::into_response) });
        };

        let server = Arc::clone(&self.server);
        let expose_details = self.expose_details;
        let head = request.method() == Method::HEAD;

        Box::pin(async move {
            tracing::debug!(path = %path, "Serving raw template");
            let mut response = match server.serve(&path).await {
                Ok(template) => template.into_response(),
                Err(e) => GalleryError::from_serve(e, expose_details).into_response(),
            };
            if head {
                *response.body_mut() = Body::empty();
            }
            Ok(response)
        })
    }
}

/// Decoded request path, if this request is one the layer answers
fn intercepted_path(request: &Request<Body>, server: &TemplateServer) -> Option<String> {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return None;
    }

    let decoded = urlencoding::decode(request.uri().path()).ok()?;
    server
        .policy()
        .accepts(&decoded)
        .then(|| decoded.into_owned())
}
