/**
 * Block Catalogue Route
 * Lists registered component types and their variants for the editor
 */
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::blocks::{BlockId, BlockRegistry, ComponentType, PropertyMap};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInfo {
    /// Block-id the editor stores when this variant is added.
    pub block_id: String,
    pub index: usize,
    pub name: String,
    pub description: String,
    pub defaults: PropertyMap,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub component_type: ComponentType,
    pub name: String,
    pub icon: String,
    pub variants: Vec<VariantInfo>,
}

pub fn catalogue(registry: &BlockRegistry) -> Vec<ComponentInfo> {
    registry
        .entries()
        .map(|entry| ComponentInfo {
            component_type: entry.component_type,
            name: entry.display_name.to_string(),
            icon: entry.icon.to_string(),
            variants: entry
                .variants
                .iter()
                .enumerate()
                .map(|(index, variant)| VariantInfo {
                    block_id: BlockId::new(entry.component_type, index).to_string(),
                    index,
                    name: variant.name.to_string(),
                    description: variant.description.to_string(),
                    defaults: variant.defaults().clone(),
                })
                .collect(),
        })
        .collect()
}

/// GET /api/blocks
pub async fn list_blocks(State(state): State<AppState>) -> Json<Vec<ComponentInfo>> {
    Json(catalogue(&state.registry))
}
