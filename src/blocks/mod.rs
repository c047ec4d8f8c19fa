//! Block identifiers, property layers and the variant registry.

pub mod id;
pub mod properties;
pub mod registry;

pub use id::{BlockId, ComponentType, VariantIndex};
pub use properties::{PropertyMap, ResolvedProperties};
pub use registry::{BlockRegistry, BlockRegistryEntry, RegistryBuilder, RenderFn, VariantDescriptor};
