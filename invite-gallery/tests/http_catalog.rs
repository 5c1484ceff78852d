//! Catalog loading over HTTP
//!
//! Spins up a local axum server standing in for the static host that
//! publishes `data.json`, then drives [`TemplateCatalog`] against it.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use invite_gallery::catalog::{
    CatalogStatus, HttpTemplateSource, LoadError, Template, TemplateCatalog, TemplateData,
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

/// Start a server on an ephemeral port and return its base URL
async fn spawn_host(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let address = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{address}")
}

fn sample() -> TemplateData {
    TemplateData {
        templates: vec![
            Template::new(1, "T01", "/templates/T01/index.html", "/images/T01.png"),
            Template::new(2, "T02", "/templates/T02/index.html", "/images/T02.png"),
            Template::new(3, "Garden Party", "/templates/T03/index.html", "/images/T03.png"),
        ],
    }
}

async fn data(State(hits): State<Arc<AtomicUsize>>) -> Json<TemplateData> {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;
    Json(sample())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_http_loads_fetch_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_host(
        Router::new()
            .route("/data.json", get(data))
            .with_state(Arc::clone(&hits)),
    )
    .await;

    let catalog = TemplateCatalog::new(HttpTemplateSource::new(format!("{base}/data.json")));

    let (first, second, count) = tokio::join!(
        catalog.get_templates(),
        catalog.search_templates("garden"),
        catalog.template_count(),
    );

    assert_eq!(first.expect("load failed").len(), 3);
    assert_eq!(second.expect("search failed")[0].id, 3);
    assert_eq!(count.expect("count failed"), 3);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.status(), CatalogStatus::Loaded { count: 3 });
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_error_status_is_reported_and_not_cached() {
    let fail = Arc::new(AtomicBool::new(true));
    let app = Router::new()
        .route(
            "/data.json",
            get(|State(fail): State<Arc<AtomicBool>>| async move {
                if fail.swap(false, Ordering::SeqCst) {
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                } else {
                    Ok(Json(sample()))
                }
            }),
        )
        .with_state(Arc::clone(&fail));
    let base = spawn_host(app).await;

    let catalog = TemplateCatalog::new(HttpTemplateSource::new(format!("{base}/data.json")));

    let error = catalog.get_templates().await.expect_err("first load should fail");
    assert_eq!(
        error,
        LoadError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        }
    );
    assert_eq!(
        error.to_string(),
        "failed to load templates: 500 Internal Server Error"
    );
    assert_eq!(catalog.status(), CatalogStatus::Empty);

    let templates = catalog.get_templates().await.expect("retry should succeed");
    assert_eq!(templates.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_invalid_json_is_parse_error() {
    let base = spawn_host(Router::new().route("/data.json", get(|| async { "not json" }))).await;

    let catalog = TemplateCatalog::new(HttpTemplateSource::new(format!("{base}/data.json")));

    assert!(matches!(
        catalog.get_templates().await,
        Err(LoadError::Parse(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_timeout() {
    let base = spawn_host(Router::new().route(
        "/data.json",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(sample())
        }),
    ))
    .await;

    let source = HttpTemplateSource::with_timeout(
        format!("{base}/data.json"),
        Duration::from_millis(100),
    )
    .expect("Failed to build client");
    let catalog = TemplateCatalog::new(source);

    assert!(matches!(
        catalog.get_templates().await,
        Err(LoadError::Fetch(_))
    ));
}
