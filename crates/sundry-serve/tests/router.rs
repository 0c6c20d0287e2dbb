//! Requests through the full router against a temporary document root.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use tempfile::TempDir;
use tower::ServiceExt;

use sundry_serve::router;

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::write(root.join("app.js"), "console.log(1);").unwrap();
    std::fs::write(root.join("data.json"), "{}").unwrap();
    std::fs::write(root.join("manifest.webmanifest"), "{}").unwrap();
    std::fs::write(root.join("icon.png"), [0x89, b'P', b'N', b'G']).unwrap();
    dir
}

async fn request(dir: &TempDir, method: Method, uri: &str) -> axum::response::Response {
    router(dir.path())
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

fn header_value<'a>(resp: &'a axum::response::Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

// ============================================================================
// Common headers
// ============================================================================

#[tokio::test]
async fn test_every_response_has_cors_and_worker_headers() {
    let dir = site();
    for uri in ["/icon.png", "/app.js", "/missing.txt"] {
        let resp = request(&dir, Method::GET, uri).await;
        assert_eq!(header_value(&resp, "access-control-allow-origin"), Some("*"));
        assert_eq!(
            header_value(&resp, "access-control-allow-methods"),
            Some("GET, POST, OPTIONS")
        );
        assert_eq!(
            header_value(&resp, "access-control-allow-headers"),
            Some("Content-Type")
        );
        assert_eq!(header_value(&resp, "service-worker-allowed"), Some("/"));
        assert_eq!(header_value(&resp, "x-content-type-options"), Some("nosniff"));
    }
}

#[tokio::test]
async fn test_options_answers_no_content() {
    let dir = site();
    let resp = request(&dir, Method::OPTIONS, "/app.js").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(header_value(&resp, "access-control-allow-origin"), Some("*"));
}

// ============================================================================
// Caching and content types
// ============================================================================

#[tokio::test]
async fn test_scripts_are_not_cached() {
    let dir = site();
    let resp = request(&dir, Method::GET, "/app.js").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header_value(&resp, "cache-control"),
        Some("no-store, no-cache, must-revalidate, max-age=0")
    );
    assert_eq!(header_value(&resp, "pragma"), Some("no-cache"));
    assert_eq!(header_value(&resp, "expires"), Some("0"));
    assert_eq!(
        header_value(&resp, header::CONTENT_TYPE.as_str()),
        Some("application/javascript")
    );
}

#[tokio::test]
async fn test_index_served_for_root() {
    let dir = site();
    let resp = request(&dir, Method::GET, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header_value(&resp, "cache-control").is_some());
}

#[tokio::test]
async fn test_images_keep_default_caching() {
    let dir = site();
    let resp = request(&dir, Method::GET, "/icon.png").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header_value(&resp, "cache-control").is_none());
    assert_eq!(header_value(&resp, "content-type"), Some("image/png"));
}

#[tokio::test]
async fn test_manifest_and_json_types() {
    let dir = site();
    let resp = request(&dir, Method::GET, "/manifest.webmanifest").await;
    assert_eq!(
        header_value(&resp, "content-type"),
        Some("application/manifest+json")
    );
    let resp = request(&dir, Method::GET, "/data.json").await;
    assert_eq!(header_value(&resp, "content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let dir = site();
    let resp = request(&dir, Method::GET, "/nope.js").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_ne!(
        header_value(&resp, "content-type"),
        Some("application/javascript")
    );
}
