//! Portfolio renderer.
//!
//! Walks a document's block list in order, resolves each block-id through the
//! registry, layers stored overrides over the variant defaults and renders
//! the variant. A block that cannot be resolved is skipped and reported as a
//! [`BlockDiagnostic`]; it never aborts the render.
//!
//! Rendering is a pure function of its inputs. The registry is only read, so
//! any number of renders may share one registry concurrently.

pub mod html;
pub mod page;

pub use html::Markup;

use serde::Serialize;

use crate::blocks::{BlockId, BlockRegistry, ComponentType, PropertyMap, VariantIndex};
use crate::document::{PortfolioContent, PortfolioDocument};
use crate::error::{BlockIdError, RegistryMiss};

/// Rendering context requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Full interactive output for the public page.
    #[default]
    Public,
    /// Thumbnail / editor canvas: scaled down, no navigation side effects.
    Preview,
}

impl RenderMode {
    pub fn from_preview_flag(is_preview: bool) -> Self {
        if is_preview {
            RenderMode::Preview
        } else {
            RenderMode::Public
        }
    }

    pub fn is_preview(self) -> bool {
        self == RenderMode::Preview
    }
}

/// One successfully rendered block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    /// Stored block-id this section came from.
    pub block_id: String,
    /// Position of the block-id in the document's block list.
    pub position: usize,
    pub component_type: ComponentType,
    pub variant_index: VariantIndex,
    /// Effective properties after the override layer was applied.
    pub properties: PropertyMap,
    pub html: Markup,
}

/// Why a block was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DiagnosticKind {
    MalformedBlockId { reason: String },
    UnknownComponentType { component_type: String },
    VariantOutOfRange { variant_index: usize, variant_count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDiagnostic {
    pub position: usize,
    pub block_id: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

/// Sections plus the side channel of skipped blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    pub sections: Vec<RenderedSection>,
    pub diagnostics: Vec<BlockDiagnostic>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Render a document, dropping unresolvable blocks.
pub fn render(
    document: &PortfolioDocument,
    registry: &BlockRegistry,
    mode: RenderMode,
) -> Vec<RenderedSection> {
    render_report(document, registry, mode).sections
}

/// Render a document and return the skipped blocks alongside the sections.
pub fn render_report(
    document: &PortfolioDocument,
    registry: &BlockRegistry,
    mode: RenderMode,
) -> RenderReport {
    let report = render_content(&document.content, registry, mode);
    if !report.is_complete() {
        tracing::info!(
            portfolio = %document.name,
            rendered = report.sections.len(),
            skipped = report.diagnostics.len(),
            "portfolio rendered with skipped blocks"
        );
    }
    report
}

/// Render bare document content, as sent by the editor's live preview.
pub fn render_content(
    content: &PortfolioContent,
    registry: &BlockRegistry,
    mode: RenderMode,
) -> RenderReport {
    let empty = PropertyMap::new();
    let mut report = RenderReport {
        sections: Vec::with_capacity(content.blocks.len()),
        diagnostics: Vec::new(),
    };

    for (position, raw_id) in content.blocks.iter().enumerate() {
        let id = match BlockId::parse(raw_id) {
            Ok(id) => id,
            Err(err) => {
                report.diagnostics.push(skip(position, raw_id, parse_failure(err)));
                continue;
            }
        };

        let variant = match registry.resolve(&id) {
            Ok(v) => v,
            Err(miss) => {
                report.diagnostics.push(skip(position, raw_id, registry_failure(id, miss)));
                continue;
            }
        };

        let overrides = match content.overrides(raw_id) {
            Some(props) => props,
            None => {
                tracing::debug!(block_id = %raw_id, "no stored properties, using defaults");
                &empty
            }
        };

        let properties = variant.resolve(overrides);
        let html = variant.render(&properties, mode);

        report.sections.push(RenderedSection {
            block_id: raw_id.clone(),
            position,
            component_type: id.component,
            variant_index: id.variant,
            properties: properties.effective(),
            html,
        });
    }

    report
}

fn parse_failure(err: BlockIdError) -> DiagnosticKind {
    match err {
        BlockIdError::UnknownComponentType(name) => DiagnosticKind::UnknownComponentType {
            component_type: name,
        },
        other => DiagnosticKind::MalformedBlockId {
            reason: other.to_string(),
        },
    }
}

fn registry_failure(id: BlockId, miss: RegistryMiss) -> DiagnosticKind {
    match miss {
        RegistryMiss::UnknownType => DiagnosticKind::UnknownComponentType {
            component_type: id.component.to_string(),
        },
        RegistryMiss::VariantOutOfRange { index, len } => DiagnosticKind::VariantOutOfRange {
            variant_index: index,
            variant_count: len,
        },
    }
}

fn skip(position: usize, block_id: &str, kind: DiagnosticKind) -> BlockDiagnostic {
    tracing::warn!(
        position,
        block_id = %block_id,
        reason = ?kind,
        "skipping unrenderable block"
    );
    BlockDiagnostic {
        position,
        block_id: block_id.to_string(),
        kind,
    }
}
