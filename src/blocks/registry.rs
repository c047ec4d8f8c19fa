//! Block registry: component type → ordered variant list.
//!
//! The registry is built once at startup and never mutated afterwards, so it
//! can be shared between concurrent renders behind an `Arc` without locking.
//! A variant's position in its list is the identity stored in documents;
//! entries must only ever be appended.

use serde_json::Value;
use std::fmt;

use super::id::{BlockId, ComponentType, VariantIndex};
use super::properties::{PropertyMap, ResolvedProperties};
use crate::error::RegistryMiss;
use crate::render::{Markup, RenderMode};

/// Pure rendering function of a variant.
pub type RenderFn = fn(&ResolvedProperties<'_>, RenderMode) -> Markup;

/// One concrete visual implementation of a component type.
#[derive(Clone)]
pub struct VariantDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    defaults: PropertyMap,
    render: RenderFn,
}

impl VariantDescriptor {
    /// `defaults` must be a JSON object; anything else declares no defaults.
    pub fn new(
        name: &'static str,
        description: &'static str,
        defaults: Value,
        render: RenderFn,
    ) -> Self {
        let defaults = match defaults {
            Value::Object(map) => map,
            _ => PropertyMap::new(),
        };
        Self {
            name,
            description,
            defaults,
            render,
        }
    }

    pub fn defaults(&self) -> &PropertyMap {
        &self.defaults
    }

    /// Layer `overrides` over this variant's defaults.
    pub fn resolve<'a>(&'a self, overrides: &'a PropertyMap) -> ResolvedProperties<'a> {
        ResolvedProperties::new(&self.defaults, overrides)
    }

    pub fn render(&self, properties: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
        (self.render)(properties, mode)
    }
}

impl fmt::Debug for VariantDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// All variants of one component type plus editor-facing metadata.
#[derive(Debug, Clone)]
pub struct BlockRegistryEntry {
    pub component_type: ComponentType,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub variants: Vec<VariantDescriptor>,
}

impl BlockRegistryEntry {
    pub fn new(component_type: ComponentType, display_name: &'static str, icon: &'static str) -> Self {
        Self {
            component_type,
            display_name,
            icon,
            variants: Vec::new(),
        }
    }

    pub fn variant(mut self, variant: VariantDescriptor) -> Self {
        self.variants.push(variant);
        self
    }
}

/// Immutable lookup table indexed by component type, then by variant index.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    entries: [Option<BlockRegistryEntry>; ComponentType::COUNT],
}

impl BlockRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn entry(&self, component_type: ComponentType) -> Option<&BlockRegistryEntry> {
        self.entries[component_type.slot()].as_ref()
    }

    pub fn variant(
        &self,
        component_type: ComponentType,
        index: VariantIndex,
    ) -> Result<&VariantDescriptor, RegistryMiss> {
        let entry = self.entry(component_type).ok_or(RegistryMiss::UnknownType)?;
        entry
            .variants
            .get(index.get())
            .ok_or(RegistryMiss::VariantOutOfRange {
                index: index.get(),
                len: entry.variants.len(),
            })
    }

    pub fn resolve(&self, id: &BlockId) -> Result<&VariantDescriptor, RegistryMiss> {
        self.variant(id.component, id.variant)
    }

    /// Registered entries in component-type order.
    pub fn entries(&self) -> impl Iterator<Item = &BlockRegistryEntry> {
        self.entries.iter().flatten()
    }

    pub fn variant_count(&self, component_type: ComponentType) -> usize {
        self.entry(component_type).map_or(0, |e| e.variants.len())
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: BlockRegistry,
}

impl RegistryBuilder {
    /// Register `entry`, replacing any earlier entry of the same type.
    pub fn entry(mut self, entry: BlockRegistryEntry) -> Self {
        let slot = entry.component_type.slot();
        if self.registry.entries[slot].is_some() {
            tracing::debug!(
                component_type = %entry.component_type,
                "replacing registry entry"
            );
        }
        self.registry.entries[slot] = Some(entry);
        self
    }

    pub fn build(self) -> BlockRegistry {
        self.registry
    }
}
