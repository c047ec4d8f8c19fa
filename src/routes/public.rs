/**
 * Public Page Route
 * Server-rendered portfolio pages
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::ApiError;
use crate::render::page::{render_error_page, render_page, PageSite};
use crate::render::{render_report, RenderMode};
use crate::AppState;

fn error_page(status: StatusCode, message: &str, name: &str) -> Response {
    let retry = format!("/p/{}", urlencoding::encode(name));
    (status, Html(render_error_page(message, &retry).into_string())).into_response()
}

/// GET /p/{name}
pub async fn portfolio_page(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let document = match state.source.fetch_by_name(&name).await {
        Ok(doc) => doc,
        Err(ApiError::NotFound) => {
            tracing::info!(portfolio = %name, "portfolio not found");
            return error_page(StatusCode::NOT_FOUND, "Portfolio no encontrado", &name);
        }
        Err(ApiError::Document(e)) => {
            tracing::error!(portfolio = %name, error = %e, "malformed portfolio document");
            return error_page(
                StatusCode::BAD_GATEWAY,
                "El portfolio tiene un formato no válido",
                &name,
            );
        }
        Err(e) => {
            tracing::error!(portfolio = %name, error = %e, "failed to fetch portfolio");
            return error_page(
                StatusCode::BAD_GATEWAY,
                "Error al cargar el portfolio",
                &name,
            );
        }
    };

    let report = render_report(&document, &state.registry, RenderMode::Public);
    tracing::debug!(
        portfolio = %document.name,
        sections = report.sections.len(),
        "portfolio page rendered"
    );

    let site = PageSite {
        name: &state.config.site_name,
        mode: RenderMode::Public,
    };
    Html(render_page(&document, &report.sections, site).into_string()).into_response()
}
