//! Error types shared across the crate.

use thiserror::Error;

/// Why a stored block-id string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockIdError {
    #[error("block id '{0}' has no '-' separator")]
    MissingSeparator(String),
    #[error("unknown component type '{0}'")]
    UnknownComponentType(String),
    #[error("variant index '{0}' is not a non-negative integer")]
    InvalidVariantIndex(String),
}

/// A registry lookup that found nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryMiss {
    #[error("component type is not registered")]
    UnknownType,
    #[error("variant index {index} is out of range ({len} variants)")]
    VariantOutOfRange { index: usize, len: usize },
}

/// A portfolio document whose top-level shape cannot be rendered at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("document has no content object")]
    MissingContent,
    #[error("document content has no blocks array")]
    MissingBlocks,
    #[error("document field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Failures talking to the portfolio API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("portfolio not found")]
    NotFound,
    #[error("portfolio API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request to portfolio API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Reasons the server could not start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid HOST/PORT configuration: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("could not build portfolio API client: {0}")]
    Client(#[from] ApiError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
