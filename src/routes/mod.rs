/**
 * Routes Module
 * HTTP route handlers
 */

pub mod blocks;
pub mod health;
pub mod preview;
pub mod public;

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::client::{InMemorySource, PortfolioSource};
    use crate::config::AppConfig;
    use crate::document::PortfolioDocument;
    use crate::error::ApiError;
    use crate::variants::standard_registry;
    use crate::AppState;

    struct UnreachableSource;

    #[async_trait]
    impl PortfolioSource for UnreachableSource {
        async fn fetch_by_name(&self, _name: &str) -> Result<PortfolioDocument, ApiError> {
            Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }

        async fn ping(&self) -> Result<Duration, ApiError> {
            Err(ApiError::Status {
                status: 503,
                body: "down".to_string(),
            })
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            log_level: None,
            portfolio_api_url: "http://portfolio-api.test".to_string(),
            api_timeout_secs: 1,
            site_name: "DevPortfolio Builder".to_string(),
            allowed_origins: vec![],
        }
    }

    pub fn state_with(documents: Vec<PortfolioDocument>) -> AppState {
        AppState::new(
            standard_registry(),
            Arc::new(InMemorySource::new(documents)),
            test_config(),
        )
    }

    pub fn failing_state() -> AppState {
        AppState::new(standard_registry(), Arc::new(UnreachableSource), test_config())
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    pub async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let (status, body) = send(app, req).await;
        (status, String::from_utf8(body).unwrap())
    }

    pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = send(app, req).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}
