//! Portfolio Renderer - block registry, renderer and HTTP service

pub mod blocks;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod render;
pub mod routes;
pub mod variants;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::blocks::BlockRegistry;
use crate::client::{PortfolioApi, PortfolioSource};
use crate::config::AppConfig;
use crate::error::StartupError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<BlockRegistry>,
    pub source: Arc<dyn PortfolioSource>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(registry: BlockRegistry, source: Arc<dyn PortfolioSource>, config: AppConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            source,
            config: Arc::new(config),
        }
    }
}

/// Configure CORS from the configured origins.
/// Falls back to the local editor origins when none are set.
pub fn configure_cors(config: &AppConfig) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        origins = vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ];
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&state.config);

    Router::new()
        .route("/p/{name}", get(routes::public::portfolio_page))
        .route("/api/render", post(routes::preview::render_preview))
        .route("/api/blocks", get(routes::blocks::list_blocks))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/ready", get(routes::health::health_ready))
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // Editor payloads carry whole documents; 2 MB is plenty.
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

/// Run the server (used by main).
pub async fn run() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let _log_guards = logging::init(&logging::LoggingConfig::from_app(&config));

    routes::health::init_start_time();

    let addr: SocketAddr = config.socket_addr()?;
    let api = PortfolioApi::from_config(&config)?;
    tracing::info!(portfolio_api = %api.base_url(), "portfolio API configured");

    let state = AppState::new(variants::standard_registry(), Arc::new(api), config);
    let app = create_app(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemorySource;
    use crate::routes::testing::state_with;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let app = create_app(state_with(vec![]));
        let res = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_app(state_with(vec![]));
        let res = app
            .oneshot(Request::get("/api/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/render")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    }

    fn app_with_origins(origins: &[&str]) -> Router {
        let mut config = AppConfig::default();
        config.allowed_origins = origins.iter().map(|o| o.to_string()).collect();
        create_app(AppState::new(
            variants::standard_registry(),
            Arc::new(InMemorySource::default()),
            config,
        ))
    }

    #[tokio::test]
    async fn test_cors_accepts_configured_origins() {
        let res = app_with_origins(&["https://editor.example"])
            .oneshot(preflight("https://editor.example"))
            .await
            .unwrap();
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://editor.example"
        );
        let methods = res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .to_string();
        assert!(methods.contains("POST"));

        let res = app_with_origins(&["https://editor.example"])
            .oneshot(preflight("https://other.example"))
            .await
            .unwrap();
        assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_cors_defaults_to_local_editor() {
        let res = app_with_origins(&[])
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );

        let res = app_with_origins(&["https://editor.example"])
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();
        assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
