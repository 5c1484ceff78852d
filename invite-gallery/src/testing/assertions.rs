//! Assertion helpers for gallery responses

use axum::http::StatusCode;
use axum_test::TestResponse;

/// Assert a successful template document response with `expected_body`
///
/// # Panics
///
/// Panics if the status, headers or body differ
pub fn assert_served_html(response: &TestResponse, expected_body: &str) {
    response.assert_status_ok();
    let content_type = response.header("content-type");
    assert_eq!(
        content_type.to_str().expect("Invalid content-type"),
        "text/html; charset=utf-8"
    );
    assert_eq!(
        response
            .header("cache-control")
            .to_str()
            .expect("Invalid cache-control"),
        "public, max-age=3600"
    );
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.text(), expected_body);
}

/// Assert a JSON error response with `status` and `error` message
///
/// # Panics
///
/// Panics if the status or the `error` field differ
pub fn assert_error(response: &TestResponse, status: StatusCode, error: &str) {
    response.assert_status(status);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"], error,
        "Expected error {error:?}, got {body}"
    );
}
