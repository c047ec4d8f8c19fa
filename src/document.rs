//! Portfolio documents as stored by the portfolio API.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::blocks::PropertyMap;
use crate::error::DocumentError;

/// Backend-assigned identifier; integer in the current backend, opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortfolioId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioId::Int(n) => write!(f, "{}", n),
            PortfolioId::Text(s) => f.write_str(s),
        }
    }
}

/// A persisted portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PortfolioId>,
    #[serde(default)]
    pub name: String,
    pub content: PortfolioContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<PortfolioId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// The editable part of a portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    /// Block-ids in render order. Non-string entries are kept as their JSON
    /// text so that they surface as malformed ids instead of failing the
    /// whole document.
    #[serde(deserialize_with = "lenient_blocks")]
    pub blocks: Vec<String>,
    #[serde(default, deserialize_with = "lenient_block_properties")]
    pub block_properties: BTreeMap<String, PropertyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl PortfolioContent {
    pub fn new(blocks: Vec<String>) -> Self {
        Self {
            blocks,
            ..Default::default()
        }
    }

    /// Stored overrides for a block-id, if any.
    pub fn overrides(&self, block_id: &str) -> Option<&PropertyMap> {
        self.block_properties.get(block_id)
    }

    /// Validate the top-level shape of a raw `content` value and decode it.
    pub fn from_json(value: Value) -> Result<Self, DocumentError> {
        let content = value.as_object().ok_or(DocumentError::MissingContent)?;
        match content.get("blocks") {
            Some(Value::Array(_)) => {}
            _ => return Err(DocumentError::MissingBlocks),
        }
        serde_json::from_value(value).map_err(|e| DocumentError::InvalidField {
            field: "content",
            reason: e.to_string(),
        })
    }
}

impl PortfolioDocument {
    /// Validate the top-level shape of a raw document and decode it.
    ///
    /// A document without a `content` object or without a `content.blocks`
    /// array must not be partially rendered, so both are reported as errors
    /// here rather than defaulted.
    pub fn from_json(value: Value) -> Result<Self, DocumentError> {
        let doc = value.as_object().ok_or(DocumentError::NotAnObject)?;
        match doc.get("content") {
            Some(Value::Object(content)) => match content.get("blocks") {
                Some(Value::Array(_)) => {}
                _ => return Err(DocumentError::MissingBlocks),
            },
            _ => return Err(DocumentError::MissingContent),
        }
        serde_json::from_value(value).map_err(|e| DocumentError::InvalidField {
            field: "document",
            reason: e.to_string(),
        })
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }
}

/// Parse a backend timestamp, with or without an explicit offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

lazy_static::lazy_static! {
    static ref SLUG_DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref SLUG_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref SLUG_DASHES: Regex = Regex::new(r"-+").unwrap();
}

/// Public slug for a portfolio name.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let kept = SLUG_DISALLOWED.replace_all(&lowered, "");
    let dashed = SLUG_WHITESPACE.replace_all(kept.trim(), "-");
    let collapsed = SLUG_DASHES.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

fn lenient_block_properties<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, PropertyMap>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries,
        Value::Null => return Ok(BTreeMap::new()),
        _ => {
            tracing::warn!("blockProperties is not an object, ignoring stored overrides");
            return Ok(BTreeMap::new());
        }
    };

    let mut out = BTreeMap::new();
    for (block_id, props) in entries {
        match props {
            Value::Object(map) => {
                out.insert(block_id, map);
            }
            Value::Null => {}
            _ => {
                tracing::warn!(block_id = %block_id, "block properties are not an object, using defaults");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_backend_document() {
        let doc = PortfolioDocument::from_json(json!({
            "id": 7,
            "name": "Mi Portfolio",
            "user_id": 3,
            "content": {
                "blocks": ["hero-0", "about-1"],
                "blockProperties": { "hero-0": { "title": "Hola" } },
                "lastUpdated": "2024-05-01T10:00:00.000Z"
            },
            "created_at": "2024-05-01T09:00:00",
            "updated_at": "2024-05-01T10:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(doc.id, Some(PortfolioId::Int(7)));
        assert_eq!(doc.content.blocks, vec!["hero-0", "about-1"]);
        assert_eq!(doc.content.overrides("hero-0").unwrap()["title"], json!("Hola"));
        assert!(doc.content.overrides("about-1").is_none());
        assert!(doc.updated_at_utc().is_some());
    }

    #[test]
    fn test_missing_blocks_is_malformed() {
        let err = PortfolioDocument::from_json(json!({
            "name": "x",
            "content": { "blockProperties": {} }
        }))
        .unwrap_err();
        assert_eq!(err, DocumentError::MissingBlocks);

        let err = PortfolioDocument::from_json(json!({
            "name": "x",
            "content": { "blocks": "hero-0" }
        }))
        .unwrap_err();
        assert_eq!(err, DocumentError::MissingBlocks);
    }

    #[test]
    fn test_missing_content_is_malformed() {
        let err = PortfolioDocument::from_json(json!({ "name": "x" })).unwrap_err();
        assert_eq!(err, DocumentError::MissingContent);
        let err = PortfolioDocument::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err, DocumentError::NotAnObject);
    }

    #[test]
    fn test_non_string_blocks_are_kept_as_text() {
        let content = PortfolioContent::from_json(json!({ "blocks": ["hero-0", 5, null] })).unwrap();
        assert_eq!(content.blocks, vec!["hero-0", "5", "null"]);
    }

    #[test]
    fn test_malformed_block_properties_are_ignored() {
        let content = PortfolioContent::from_json(json!({
            "blocks": ["hero-0"],
            "blockProperties": { "hero-0": "oops", "about-0": { "title": "ok" } }
        }))
        .unwrap();
        assert!(content.overrides("hero-0").is_none());
        assert!(content.overrides("about-0").is_some());

        let content =
            PortfolioContent::from_json(json!({ "blocks": [], "blockProperties": [1] })).unwrap();
        assert!(content.block_properties.is_empty());
    }

    #[test]
    fn test_slugify_matches_public_urls() {
        assert_eq!(slugify("Mi Portfolio"), "mi-portfolio");
        assert_eq!(slugify("  Dev   Portfolio 2024 "), "dev-portfolio-2024");
        assert_eq!(slugify("Sobre Mí!"), "sobre-m");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_parse_timestamp_accepts_naive_and_offset() {
        assert!(parse_timestamp("2024-01-15T12:00:00").is_some());
        assert!(parse_timestamp("2024-01-15T12:00:00.123456").is_some());
        assert!(parse_timestamp("2024-01-15T12:00:00Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
