//! Minimal HTML building helpers shared by block variants and the page shell.

use serde::Serialize;
use std::fmt;

use crate::blocks::ComponentType;

/// URL schemes an outbound link may navigate to.
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Rendered HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Markup {
    fn from(s: String) -> Self {
        Markup(s)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Join non-empty class names with single spaces.
pub fn classes(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `href` is relative or uses an allowed scheme.
///
/// Browsers ignore ASCII whitespace and control characters inside a scheme,
/// so they are dropped before the scheme is read.
pub fn is_safe_href(href: &str) -> bool {
    let normalized: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    match normalized.find([':', '/', '?', '#']) {
        Some(i) if normalized.as_bytes()[i] == b':' => {
            ALLOWED_SCHEMES.contains(&&normalized[..i])
        }
        _ => true,
    }
}

fn inert_link(class: &str, style: &str, body: &str) -> String {
    format!(
        r#"<a class="{}" style="{}" aria-disabled="true">{}</a>"#,
        class,
        style,
        body
    )
}

/// Link that navigates away from the page (mailto, external profile, CV).
///
/// `class`, `style` and `body` are inserted as-is and must already be escaped.
/// Preview renders keep the visual element but drop `href`, so clicking a
/// thumbnail never leaves the editor. Targets with a scheme outside
/// `http`, `https`, `mailto` and `tel` are rendered the same way.
pub fn outbound_link(href: &str, class: &str, style: &str, body: &str, preview: bool) -> String {
    if preview || href.trim().is_empty() {
        return inert_link(class, style, body);
    }
    if !is_safe_href(href) {
        tracing::warn!(href = %href, "dropping link with disallowed scheme");
        return inert_link(class, style, body);
    }
    format!(
        r#"<a class="{}" style="{}" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        class,
        style,
        escape_html(href.trim()),
        body
    )
}

/// In-page link that smooth-scrolls to the first section of `target` type.
///
/// `class`, `style` and `body` are inserted as-is and must already be escaped.
/// Preview renders drop both the anchor and the scroll hook, and so does a
/// target that is not a component type name.
pub fn scroll_link(target: &str, class: &str, style: &str, body: &str, preview: bool) -> String {
    let target = match ComponentType::from_name(target.trim()) {
        Some(ty) if !preview => ty.as_str(),
        _ => return inert_link(class, style, body),
    };
    format!(
        r##"<a class="{}" style="{}" href="#{}" data-scroll-target="{}">{}</a>"##,
        class,
        style,
        target,
        target,
        body
    )
}
