/**
 * Render API Route
 * Renders editor content into sections for live preview
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::document::{PortfolioContent, PortfolioDocument};
use crate::error::DocumentError;
use crate::render::{render_content, render_report, RenderMode, RenderReport};
use crate::AppState;

/// Either a full stored document or bare editor content.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub document: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub preview: bool,
}

fn unprocessable(error: DocumentError) -> (StatusCode, Json<Value>) {
    tracing::warn!(error = %error, "render request rejected");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": error.to_string() })),
    )
}

fn render_request(
    request: RenderRequest,
    state: &AppState,
) -> Result<RenderReport, DocumentError> {
    let mode = RenderMode::from_preview_flag(request.preview);
    match (request.document, request.content) {
        (Some(document), _) => {
            let document = PortfolioDocument::from_json(document)?;
            Ok(render_report(&document, &state.registry, mode))
        }
        (None, Some(content)) => {
            let content = PortfolioContent::from_json(content)?;
            Ok(render_content(&content, &state.registry, mode))
        }
        (None, None) => Err(DocumentError::MissingContent),
    }
}

/// POST /api/render
pub async fn render_preview(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Response {
    match render_request(request, &state) {
        Ok(report) => Json(report).into_response(),
        Err(e) => unprocessable(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{post_json, state_with};
    use axum::routing::post;
    use axum::Router;

    fn test_router() -> Router {
        Router::new()
            .route("/api/render", post(render_preview))
            .with_state(state_with(vec![]))
    }

    #[tokio::test]
    async fn test_render_content_with_diagnostics() {
        let body = json!({
            "content": {
                "blocks": ["hero-0", "about-5", "widget-1", "projects-x"],
                "blockProperties": { "hero-0": { "title": "Hi" } }
            }
        });
        let (status, value) = post_json(test_router(), "/api/render", body).await;
        assert_eq!(status, StatusCode::OK);

        let sections = value["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0]["blockId"], "hero-0");
        assert_eq!(sections[0]["componentType"], "hero");
        assert_eq!(sections[0]["variantIndex"], 0);
        assert_eq!(sections[0]["properties"]["title"], "Hi");

        let kinds: Vec<_> = value["diagnostics"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec!["variantOutOfRange", "unknownComponentType", "malformedBlockId"]
        );
        assert_eq!(value["diagnostics"][0]["position"], 1);
        assert_eq!(value["diagnostics"][0]["variantCount"], 4);
    }

    #[tokio::test]
    async fn test_preview_flag_scales_sections() {
        let body = json!({ "content": { "blocks": ["hero-0"] }, "preview": true });
        let (_, value) = post_json(test_router(), "/api/render", body).await;
        let html = value["sections"][0]["html"].as_str().unwrap();
        assert!(html.contains("scale-75 pointer-events-none"));
        assert!(!html.contains("data-scroll-target"));
    }

    #[tokio::test]
    async fn test_full_document_is_accepted() {
        let body = json!({ "document": { "name": "ana", "content": { "blocks": ["contact-1"] } } });
        let (status, value) = post_json(test_router(), "/api/render", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["sections"][0]["componentType"], "contact");
    }

    #[tokio::test]
    async fn test_missing_blocks_is_422() {
        let (status, value) =
            post_json(test_router(), "/api/render", json!({ "content": { "blockProperties": {} } }))
                .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(value["error"].as_str().unwrap().contains("blocks"));

        let (status, _) = post_json(test_router(), "/api/render", json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
