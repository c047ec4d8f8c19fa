use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use portfolio_renderer::client::InMemorySource;
use portfolio_renderer::config::AppConfig;
use portfolio_renderer::document::PortfolioDocument;
use portfolio_renderer::render::{render, RenderMode};
use portfolio_renderer::variants::standard_registry;
use portfolio_renderer::{create_app, AppState};

fn published() -> PortfolioDocument {
    PortfolioDocument::from_json(json!({
        "id": 12,
        "name": "Laura Martín",
        "user_id": 3,
        "content": {
            "blocks": ["hero-1", "about-3", "projects-0", "about-9", "contact-1"],
            "blockProperties": {
                "hero-1": { "title": "Laura Martín", "githubLink": "https://github.com/laura" },
                "about-3": { "skills": ["Rust", "Tokio"] },
                "contact-1": { "email": "laura@example.com", "showSocial": null }
            },
            "lastUpdated": "2024-06-01T12:00:00Z"
        },
        "updated_at": "2024-06-01T12:00:00"
    }))
    .unwrap()
}

fn app() -> axum::Router {
    let mut config = AppConfig::default();
    config.site_name = "DevPortfolio Builder".to_string();
    let state = AppState::new(
        standard_registry(),
        Arc::new(InMemorySource::new(vec![published()])),
        config,
    );
    create_app(state)
}

#[test]
fn test_render_keeps_order_and_skips_dangling_block() {
    let registry = standard_registry();
    let sections = render(&published(), &registry, RenderMode::Public);

    let ids: Vec<_> = sections.iter().map(|s| s.block_id.as_str()).collect();
    assert_eq!(ids, vec!["hero-1", "about-3", "projects-0", "contact-1"]);
    assert_eq!(sections[3].position, 4);

    assert_eq!(sections[1].properties["skills"], json!(["Rust", "Tokio"]));
    assert_eq!(sections[3].properties["showSocial"], json!(true));
    assert_eq!(sections[3].properties["email"], json!("laura@example.com"));
}

#[tokio::test]
async fn test_public_page_by_encoded_name() {
    let res = app()
        .oneshot(Request::get("/p/Laura%20Mart%C3%ADn").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<title>Laura Martín - Portfolio</title>"));
    assert!(html.contains(r#"href="https://github.com/laura""#));
    assert!(html.contains(r#"href="mailto:laura@example.com""#));
    assert!(html.contains(">Tokio<"));
    assert_eq!(html.matches("<section").count(), 4);
    assert!(html.contains(r#"<link rel="canonical" href="/p/Laura%20Mart%C3%ADn" />"#));
}

#[tokio::test]
async fn test_canonical_link_resolves() {
    let page = app()
        .oneshot(Request::get("/p/Laura%20Mart%C3%ADn").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = axum::body::to_bytes(page.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    let start = html.find(r#"rel="canonical" href=""#).unwrap() + r#"rel="canonical" href=""#.len();
    let canonical = &html[start..start + html[start..].find('"').unwrap()];

    let res = app()
        .oneshot(Request::get(canonical).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let slug = app()
        .oneshot(Request::get("/p/laura-martn").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(slug.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_render_endpoint_matches_library_render() {
    let body = json!({ "document": serde_json::to_value(published()).unwrap() });
    let res = app()
        .oneshot(
            Request::post("/api/render")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();

    let expected = render(&published(), &standard_registry(), RenderMode::Public);
    let html: Vec<_> = report["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["html"].as_str().unwrap().to_string())
        .collect();
    let expected_html: Vec<_> = expected.iter().map(|s| s.html.to_string()).collect();
    assert_eq!(html, expected_html);

    assert_eq!(
        report["diagnostics"],
        json!([{
            "position": 3,
            "blockId": "about-9",
            "kind": "variantOutOfRange",
            "variantIndex": 9,
            "variantCount": 4
        }])
    );
}
