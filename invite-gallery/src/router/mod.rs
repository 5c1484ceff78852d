//! Router assembly and the HTTP server loop
//!
//! [`build`] wires every route onto one [`Router`]:
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/template?url=` | [`handlers::template::serve_template_api`] |
//! | `GET /api/templates` | [`handlers::catalog::list_templates`] |
//! | `GET /api/templates/search?q=` | [`handlers::catalog::search_templates`] |
//! | `GET /api/templates/{id}` | [`handlers::catalog::get_template`] |
//! | `GET /api/templates/by-title/{title}` | [`handlers::catalog::get_template_by_title`] |
//! | `GET /health`, `/health/live`, `/health/ready` | [`health`] |
//! | anything else | files under the public directory |
//!
//! In development, requests that reach the static fallback go through
//! [`RawTemplatesLayer`] first, so template documents get the same rules as
//! `/api/template`. Matched API routes never see the layer.

use crate::{
    handlers::{catalog, template},
    health,
    middleware::RawTemplatesLayer,
    state::AppState,
    urls::TEMPLATE_API_PATH,
};
use anyhow::Context;
use axum::{routing::get, Router};
use tower::Layer;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Build the application router for `state`
#[must_use]
pub fn build(state: AppState) -> Router {
    let settings = &state.config().templates;
    let intercept_raw =
        settings.raw_dev_serving && !state.config().server.environment.is_production();
    let static_files = ServeDir::new(&settings.public_dir);

    let router = Router::new()
        .route(
            TEMPLATE_API_PATH,
            get(template::serve_template_api)
                .head(template::method_not_allowed)
                .fallback(template::method_not_allowed),
        )
        .route("/api/templates", get(catalog::list_templates))
        .route("/api/templates/search", get(catalog::search_templates))
        .route("/api/templates/{id}", get(catalog::get_template))
        .route(
            "/api/templates/by-title/{title}",
            get(catalog::get_template_by_title),
        )
        .route("/health", get(health::readiness))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let router = if intercept_raw {
        tracing::debug!("Raw template interception enabled");
        let raw = RawTemplatesLayer::new(state.shared_server(), state.expose_error_details());
        router.fallback_service(raw.layer(static_files))
    } else {
        router.fallback_service(static_files)
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind, warm the catalog and serve until Ctrl+C
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let address = state.config().server.bind_address();

    if state.config().catalog.preload {
        let catalog = state.catalog().clone();
        tokio::spawn(async move { catalog.preload().await });
    }

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, build(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
