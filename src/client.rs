//! HTTP client for the portfolio API.
//!
//! The public page only needs [`PortfolioSource`]; the remaining calls cover
//! the portfolio management endpoints used by the editor and CLI tooling.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::document::{PortfolioContent, PortfolioDocument, PortfolioId};
use crate::error::ApiError;

/// Where published portfolios come from.
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    async fn fetch_by_name(&self, name: &str) -> Result<PortfolioDocument, ApiError>;

    /// Round trip to the backing store, for health checks.
    async fn ping(&self) -> Result<Duration, ApiError>;
}

/// Payload for creating a portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct NewPortfolio {
    pub name: String,
    pub content: PortfolioContent,
    pub user_id: PortfolioId,
}

impl NewPortfolio {
    /// Empty portfolio stamped with the current time.
    pub fn empty(name: impl Into<String>, user_id: PortfolioId) -> Self {
        let mut content = PortfolioContent::new(Vec::new());
        content.last_updated = Some(chrono::Utc::now().to_rfc3339());
        Self {
            name: name.into().trim().to_string(),
            content,
            user_id,
        }
    }
}

/// Partial update; absent fields are left untouched by the API.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PortfolioUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PortfolioContent>,
}

#[derive(Debug, Clone)]
pub struct PortfolioApi {
    client: Client,
    base_url: String,
}

impl PortfolioApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("portfolio-renderer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(config.portfolio_api_url.clone(), config.api_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /portfolio/{name}`
    pub async fn fetch_by_name(&self, name: &str) -> Result<PortfolioDocument, ApiError> {
        let url = self.url(&format!("/portfolio/{}", urlencoding::encode(name)));
        tracing::debug!(%url, "fetching portfolio");
        let response = check(self.client.get(&url).send().await?).await?;
        let body: Value = response.json().await?;
        Ok(PortfolioDocument::from_json(body)?)
    }

    /// `GET /api/portfolios/user/{user_id}`
    pub async fn list_for_user(&self, user_id: &PortfolioId) -> Result<Vec<PortfolioDocument>, ApiError> {
        let url = self.url(&format!("/api/portfolios/user/{}", user_id));
        let response = check(self.client.get(&url).send().await?).await?;
        let body: Vec<Value> = response.json().await?;
        let portfolios = body
            .into_iter()
            .map(PortfolioDocument::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(user_id = %user_id, count = portfolios.len(), "listed portfolios");
        Ok(portfolios)
    }

    /// `POST /api/portfolios/`
    pub async fn create(&self, portfolio: &NewPortfolio) -> Result<PortfolioDocument, ApiError> {
        let url = self.url("/api/portfolios/");
        let response = check(self.client.post(&url).json(portfolio).send().await?).await?;
        let created = PortfolioDocument::from_json(response.json().await?)?;
        tracing::info!(name = %created.name, "portfolio created");
        Ok(created)
    }

    /// `PUT /api/portfolios/{id}`
    pub async fn update(
        &self,
        id: &PortfolioId,
        update: &PortfolioUpdate,
    ) -> Result<PortfolioDocument, ApiError> {
        let url = self.url(&format!("/api/portfolios/{}", id));
        let response = check(self.client.put(&url).json(update).send().await?).await?;
        Ok(PortfolioDocument::from_json(response.json().await?)?)
    }

    /// `POST /api/portfolios/{id}/duplicate`
    pub async fn duplicate(&self, id: &PortfolioId) -> Result<PortfolioDocument, ApiError> {
        let url = self.url(&format!("/api/portfolios/{}/duplicate", id));
        let response = check(self.client.post(&url).send().await?).await?;
        Ok(PortfolioDocument::from_json(response.json().await?)?)
    }

    /// `DELETE /api/portfolios/{id}`
    pub async fn delete(&self, id: &PortfolioId) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/portfolios/{}", id));
        check(self.client.delete(&url).send().await?).await?;
        tracing::info!(id = %id, "portfolio deleted");
        Ok(())
    }
}

#[async_trait]
impl PortfolioSource for PortfolioApi {
    async fn fetch_by_name(&self, name: &str) -> Result<PortfolioDocument, ApiError> {
        PortfolioApi::fetch_by_name(self, name).await
    }

    async fn ping(&self) -> Result<Duration, ApiError> {
        let start = Instant::now();
        // Any HTTP answer means the API is reachable.
        self.client.get(&self.base_url).send().await?;
        Ok(start.elapsed())
    }
}

/// Fixed set of documents keyed by name, for tests and offline rendering.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, PortfolioDocument>,
}

impl InMemorySource {
    pub fn new(documents: impl IntoIterator<Item = PortfolioDocument>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|doc| (doc.name.clone(), doc))
                .collect(),
        }
    }
}

#[async_trait]
impl PortfolioSource for InMemorySource {
    /// Exact-name lookup, the same as the portfolio API.
    async fn fetch_by_name(&self, name: &str) -> Result<PortfolioDocument, ApiError> {
        self.documents.get(name).cloned().ok_or(ApiError::NotFound)
    }

    async fn ping(&self) -> Result<Duration, ApiError> {
        Ok(Duration::ZERO)
    }
}

/// Map non-success statuses to [`ApiError`].
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "portfolio API error");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
