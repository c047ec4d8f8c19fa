//! Full HTML documents around rendered sections.

use std::collections::HashSet;

use super::html::{escape_html, Markup};
use super::{RenderMode, RenderedSection};
use crate::document::PortfolioDocument;

const SMOOTH_SCROLL: &str = r#"<script>
document.addEventListener('click', function (event) {
  var link = event.target.closest('[data-scroll-target]');
  if (!link) return;
  var target = document.querySelector('[data-component-type="' + CSS.escape(link.dataset.scrollTarget) + '"]');
  if (!target) return;
  event.preventDefault();
  target.scrollIntoView({ behavior: 'smooth', block: 'start' });
});
</script>"#;

/// Page-level settings that do not come from the document.
#[derive(Debug, Clone, Copy)]
pub struct PageSite<'a> {
    /// Builder name credited in the footer.
    pub name: &'a str,
    pub mode: RenderMode,
}

impl Default for PageSite<'_> {
    fn default() -> Self {
        PageSite {
            name: "DevPortfolio Builder",
            mode: RenderMode::Public,
        }
    }
}

/// Wrap sections in their page container.
///
/// The first section of each component type also gets the type as its `id`,
/// so `#projects` style anchors work without the scroll script.
pub fn section_markup(sections: &[RenderedSection]) -> String {
    let mut seen = HashSet::new();
    sections
        .iter()
        .map(|section| {
            let ty = section.component_type.as_str();
            let anchor = if seen.insert(ty) {
                format!(r#" id="{}""#, ty)
            } else {
                String::new()
            };
            format!(
                r#"<section class="w-full"{} data-block-id="{}" data-component-type="{}">
{}
</section>"#,
                anchor,
                escape_html(&section.block_id),
                ty,
                section.html
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the public page for a portfolio.
pub fn render_page(
    document: &PortfolioDocument,
    sections: &[RenderedSection],
    site: PageSite<'_>,
) -> Markup {
    let name = escape_html(&document.name);
    let title = format!("{} - Portfolio", name);
    let description = format!("Portfolio de {}", name);
    // `/p/{name}` looks portfolios up by exact name, so the link carries it encoded.
    let canonical = format!("/p/{}", escape_html(&urlencoding::encode(&document.name)));

    let modified = document
        .updated_at_utc()
        .map(|ts| {
            format!(
                "\n    <meta property=\"article:modified_time\" content=\"{}\" />",
                ts.to_rfc3339()
            )
        })
        .unwrap_or_default();

    let script = if site.mode.is_preview() { "" } else { SMOOTH_SCROLL };

    Markup::from(format!(
        r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <meta name="description" content="{description}" />
    <meta property="og:title" content="{title}" />
    <meta property="og:description" content="{description}" />
    <meta property="og:type" content="profile" />
    <link rel="canonical" href="{canonical}" />{modified}
  </head>
  <body class="min-h-screen bg-white">
    <main>
{sections}
    </main>
    <footer class="bg-gray-900 text-white py-8">
      <div class="max-w-6xl mx-auto px-4 text-center">
        <p class="text-gray-400">Creado con {site}</p>
      </div>
    </footer>
    {script}
  </body>
</html>
"#,
        title = title,
        description = description,
        canonical = canonical,
        modified = modified,
        sections = section_markup(sections),
        site = escape_html(site.name),
        script = script,
    ))
}

/// Page shown when a portfolio cannot be fetched or rendered at all.
pub fn render_error_page(message: &str, retry_href: &str) -> Markup {
    Markup::from(format!(
        r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Portfolio no disponible</title>
    <meta name="robots" content="noindex" />
  </head>
  <body class="min-h-screen bg-gray-50 flex items-center justify-center">
    <div class="text-center">
      <p class="text-red-600 mb-4">{message}</p>
      <a href="{retry}" class="bg-blue-600 text-white px-4 py-2 rounded-lg mr-2">Reintentar</a>
      <a href="/" class="text-gray-600 underline">Volver al inicio</a>
    </div>
  </body>
</html>
"#,
        message = escape_html(message),
        retry = escape_html(retry_href),
    ))
}
