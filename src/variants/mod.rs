//! Built-in block variants and the standard registry.
//!
//! Variant order inside each entry is the index stored in published
//! documents. New variants go at the end of their list.

pub mod about;
pub mod contact;
pub mod hero;
pub mod projects;

use crate::blocks::{BlockRegistry, ResolvedProperties};
use crate::render::html::{classes, escape_html};
use crate::render::RenderMode;

/// Registry with every built-in variant.
pub fn standard_registry() -> BlockRegistry {
    let registry = BlockRegistry::builder()
        .entry(hero::entry())
        .entry(about::entry())
        .entry(projects::entry())
        .entry(contact::entry())
        .build();

    tracing::debug!(
        entries = registry.entries().count(),
        variants = registry.entries().map(|e| e.variants.len()).sum::<usize>(),
        "block registry built"
    );
    registry
}

/// Class list of a variant's root element.
///
/// Preview renders are scaled down and ignore pointer input.
fn root_class(mode: RenderMode, parts: &[&str]) -> String {
    let preview = if mode.is_preview() {
        "scale-75 pointer-events-none"
    } else {
        ""
    };
    let mut all = Vec::with_capacity(parts.len() + 1);
    all.push(preview);
    all.extend_from_slice(parts);
    escape_html(&classes(&all))
}

/// Escaped class attribute value.
fn class(parts: &[&str]) -> String {
    escape_html(&classes(parts))
}

/// Inline style from `(property, value)` pairs; empty values are dropped.
fn style(pairs: &[(&str, &str)]) -> String {
    let css = pairs
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{}: {}", k, v.trim()))
        .collect::<Vec<_>>()
        .join("; ");
    escape_html(&css)
}

/// Escaped text property.
fn text(props: &ResolvedProperties<'_>, key: &str) -> String {
    escape_html(&props.text(key))
}

/// Colour with a hex alpha suffix, as used for tinted borders and badges.
fn tint(color: &str, alpha: &str) -> String {
    if color.starts_with('#') && color.len() == 7 {
        format!("{}{}", color, alpha)
    } else {
        color.to_string()
    }
}
