//! Test server utilities using axum-test
//!
//! Thin wrapper around `axum_test::TestServer` that builds the full
//! application router from [`AppState`].

use crate::state::AppState;
use axum::{http::Method, Router};

/// Test server wrapper for integration testing
///
/// # Example
///
/// ```rust,ignore
/// let fixture = GalleryFixture::new();
/// let server = TestServer::from_state(fixture.state(Environment::Development)).unwrap();
///
/// server.get("/api/templates").await.assert_status_ok();
/// ```
pub struct TestServer {
    inner: axum_test::TestServer,
}

impl TestServer {
    /// Create a new test server from an Axum router
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started
    pub fn new(app: Router) -> anyhow::Result<Self> {
        let inner = axum_test::TestServer::new(app)?;
        Ok(Self { inner })
    }

    /// Create a test server running the application router for `state`
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started
    pub fn from_state(state: AppState) -> anyhow::Result<Self> {
        Self::new(crate::router::build(state))
    }

    /// Make a GET request to the server
    pub fn get(&self, path: &str) -> axum_test::TestRequest {
        self.inner.get(path)
    }

    /// Make a HEAD request to the server
    pub fn head(&self, path: &str) -> axum_test::TestRequest {
        self.inner.method(Method::HEAD, path)
    }

    /// Make a POST request to the server
    pub fn post(&self, path: &str) -> axum_test::TestRequest {
        self.inner.post(path)
    }

    /// Make a DELETE request to the server
    pub fn delete(&self, path: &str) -> axum_test::TestRequest {
        self.inner.delete(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_server_creation() {
        let app = Router::new().route("/", get(|| async { "Hello" }));
        let server = TestServer::new(app).unwrap();
        let response = server.get("/").await;
        response.assert_status_ok();
    }
}
