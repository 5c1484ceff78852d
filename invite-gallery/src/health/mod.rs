//! Liveness and readiness endpoints
//!
//! Liveness only says the process answers. Readiness reports whether the
//! catalog has been loaded; it reads the cached status and never starts a load.
//! An unloaded catalog is `degraded`, not a failure: the first catalog request
//! loads it.

use crate::catalog::CatalogStatus;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Readiness of one component or of the whole service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Ready to answer from cache
    Healthy,
    /// Answering, but the next request may have to load first
    Degraded,
}

/// One entry under `components`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: HealthStatus,
    /// Human-readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    /// Map the catalog's cache state
    #[must_use]
    pub fn from_catalog(status: CatalogStatus) -> Self {
        let (status, message) = match status {
            CatalogStatus::Loaded { count } => {
                (HealthStatus::Healthy, format!("{count} templates loaded"))
            }
            CatalogStatus::Loading => (HealthStatus::Degraded, "Catalog is loading".to_string()),
            CatalogStatus::Empty => (HealthStatus::Degraded, "Catalog not loaded".to_string()),
        };
        Self {
            status,
            message: Some(message),
        }
    }
}

/// Body of `/health` and `/health/ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Worst status among `components`
    pub status: HealthStatus,
    /// Crate version
    pub version: String,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    /// Status per component, keyed by name
    pub components: BTreeMap<String, ComponentHealth>,
}

impl HealthReport {
    /// Report for the catalog held by `state`
    #[must_use]
    pub fn for_state(state: &AppState) -> Self {
        Self::from_components([(
            "catalog",
            ComponentHealth::from_catalog(state.catalog().status()),
        )])
    }

    fn from_components<'a>(
        components: impl IntoIterator<Item = (&'a str, ComponentHealth)>,
    ) -> Self {
        let components: BTreeMap<String, ComponentHealth> = components
            .into_iter()
            .map(|(name, health)| (name.to_string(), health))
            .collect();
        let status = if components
            .values()
            .any(|c| c.status == HealthStatus::Degraded)
        {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map_or(0, |d| d.as_secs()),
            components,
        }
    }
}

impl IntoResponse for HealthReport {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `GET /health/live`
#[allow(clippy::unused_async)]
pub async fn liveness() -> &'static str {
    "OK"
}

/// `GET /health` and `GET /health/ready`
#[allow(clippy::unused_async)]
pub async fn readiness(State(state): State<AppState>) -> HealthReport {
    HealthReport::for_state(&state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_from_catalog() {
        let loaded = ComponentHealth::from_catalog(CatalogStatus::Loaded { count: 3 });
        assert_eq!(loaded.status, HealthStatus::Healthy);
        assert_eq!(loaded.message.as_deref(), Some("3 templates loaded"));

        assert_eq!(
            ComponentHealth::from_catalog(CatalogStatus::Loading).status,
            HealthStatus::Degraded
        );
        assert_eq!(
            ComponentHealth::from_catalog(CatalogStatus::Empty).status,
            HealthStatus::Degraded
        );
    }

    #[test]
    fn test_report_takes_worst_status() {
        let report = HealthReport::from_components([
            ("catalog", ComponentHealth::from_catalog(CatalogStatus::Loaded { count: 1 })),
        ]);
        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));

        let report = HealthReport::from_components([
            ("catalog", ComponentHealth::from_catalog(CatalogStatus::Empty)),
        ]);
        assert_eq!(report.status, HealthStatus::Degraded);
    }

    #[test]
    fn test_report_serializes_lowercase_status() {
        let report = HealthReport::from_components([(
            "catalog",
            ComponentHealth::from_catalog(CatalogStatus::Loading),
        )]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["components"]["catalog"]["message"], "Catalog is loading");
    }
}
