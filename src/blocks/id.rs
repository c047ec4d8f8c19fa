//! Block-id parsing.
//!
//! Documents store each placed block as a `"<componentType>-<variantIndex>"`
//! string. The string is parsed into a typed [`BlockId`] as soon as it is read
//! and only the typed form is used for lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BlockIdError;

/// Fixed set of section categories a portfolio can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Hero,
    About,
    Projects,
    Contact,
}

impl ComponentType {
    pub const COUNT: usize = 4;

    pub const ALL: [ComponentType; Self::COUNT] = [
        ComponentType::Hero,
        ComponentType::About,
        ComponentType::Projects,
        ComponentType::Contact,
    ];

    /// Wire name used inside block-ids.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Hero => "hero",
            ComponentType::About => "about",
            ComponentType::Projects => "projects",
            ComponentType::Contact => "contact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Dense slot used by the registry table.
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a variant inside its component type's variant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantIndex(pub usize);

impl VariantIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VariantIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed block-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    pub component: ComponentType,
    pub variant: VariantIndex,
}

impl BlockId {
    pub fn new(component: ComponentType, variant: usize) -> Self {
        Self {
            component,
            variant: VariantIndex(variant),
        }
    }

    /// Parse the stored wire form, splitting on the first `-`.
    ///
    /// The index must be one or more ASCII digits: signs, whitespace and
    /// trailing segments (`"hero-0-1"`) are rejected.
    pub fn parse(raw: &str) -> Result<Self, BlockIdError> {
        let (type_name, index) = raw
            .split_once('-')
            .ok_or_else(|| BlockIdError::MissingSeparator(raw.to_string()))?;

        let component = ComponentType::from_name(type_name)
            .ok_or_else(|| BlockIdError::UnknownComponentType(type_name.to_string()))?;

        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BlockIdError::InvalidVariantIndex(index.to_string()));
        }
        let variant = index
            .parse::<usize>()
            .map_err(|_| BlockIdError::InvalidVariantIndex(index.to_string()))?;

        Ok(Self::new(component, variant))
    }
}

impl FromStr for BlockId {
    type Err = BlockIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.component, self.variant)
    }
}
