//! Runtime configuration gathered from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// `LOG_LEVEL`; unset means debug in development and info in production.
    pub log_level: Option<String>,
    /// Base URL of the portfolio API, without a trailing slash.
    pub portfolio_api_url: String,
    pub api_timeout_secs: u64,
    /// Builder name credited in page footers.
    pub site_name: String,
    /// Comma separated CORS origins; empty means the local dev defaults.
    pub allowed_origins: Vec<String>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_parsed("PORT", 3001),
            environment: env_or("ENVIRONMENT", "development"),
            log_level: std::env::var("LOG_LEVEL").ok().filter(|v| !v.trim().is_empty()),
            portfolio_api_url: env_or("PORTFOLIO_API_URL", "http://localhost:8000")
                .trim_end_matches('/')
                .to_string(),
            api_timeout_secs: env_parsed("API_TIMEOUT_SECS", 10),
            site_name: env_or("SITE_NAME", "DevPortfolio Builder"),
            allowed_origins: parse_origins(&std::env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs.max(1))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://a.dev, ,https://b.dev "),
            vec!["https://a.dev".to_string(), "https://b.dev".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "production".to_string(),
            log_level: None,
            portfolio_api_url: "http://api".to_string(),
            api_timeout_secs: 0,
            site_name: "x".to_string(),
            allowed_origins: vec![],
        };
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert!(config.is_production());
        assert_eq!(config.api_timeout(), Duration::from_secs(1));
    }
}
