//! Project showcase sections.

use serde_json::{json, Value};

use super::{class, root_class, style, text, tint};
use crate::blocks::properties::field_text;
use crate::blocks::{BlockRegistryEntry, ComponentType, ResolvedProperties, VariantDescriptor};
use crate::render::html::{escape_html, outbound_link};
use crate::render::{Markup, RenderMode};

pub fn entry() -> BlockRegistryEntry {
    BlockRegistryEntry::new(ComponentType::Projects, "Proyectos", "briefcase")
        .variant(VariantDescriptor::new(
            "Grid",
            "Proyectos en formato cuadrícula",
            json!({
                "title": "Mis Proyectos",
                "description": "Algunos trabajos destacados que demuestran mis habilidades",
                "backgroundColor": "#ffffff",
                "textColor": "#1f2937",
                "primaryColor": "#3b82f6",
                "fontSize": "text-3xl",
                "textAlign": "text-center",
                "padding": "p-12",
                "borderRadius": "rounded-xl",
                "showTechnologies": true,
                "showLinks": true,
                "projects": [
                    {
                        "title": "E-commerce Platform",
                        "description": "Plataforma completa de comercio electrónico con React y Node.js",
                        "image": "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=400&h=250&fit=crop",
                        "technologies": ["React", "Node.js", "MongoDB"],
                        "demoLink": "https://demo.com",
                        "githubLink": "https://github.com"
                    },
                    {
                        "title": "Task Management App",
                        "description": "Aplicación de gestión de tareas con funcionalidades avanzadas",
                        "image": "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=400&h=250&fit=crop",
                        "technologies": ["Vue.js", "Firebase", "Tailwind"],
                        "demoLink": "https://demo.com",
                        "githubLink": "https://github.com"
                    },
                    {
                        "title": "Portfolio Website",
                        "description": "Sitio web personal con diseño moderno y responsivo",
                        "image": "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=400&h=250&fit=crop",
                        "technologies": ["Next.js", "TypeScript", "Vercel"],
                        "demoLink": "https://demo.com",
                        "githubLink": "https://github.com"
                    }
                ]
            }),
            grid,
        ))
        .variant(VariantDescriptor::new(
            "Minimal",
            "Lista de proyectos con tipografía destacada",
            json!({
                "title": "Trabajos Seleccionados",
                "backgroundColor": "#ffffff",
                "textColor": "#374151",
                "primaryColor": "#6366f1",
                "padding": "p-12",
                "projects": [
                    {
                        "title": "E-commerce Platform",
                        "description": "Full-stack e-commerce solution",
                        "technologies": ["React", "Node.js", "Stripe"],
                        "demoLink": "https://demo.com"
                    },
                    {
                        "title": "Task Management",
                        "description": "Collaborative project management tool",
                        "technologies": ["Vue.js", "Firebase"],
                        "demoLink": "https://demo.com"
                    },
                    {
                        "title": "Analytics Dashboard",
                        "description": "Real-time data visualization platform",
                        "technologies": ["D3.js", "Python", "FastAPI"],
                        "demoLink": "https://demo.com"
                    }
                ]
            }),
            minimal,
        ))
}

fn technologies(project: &Value) -> Vec<String> {
    project
        .get("technologies")
        .and_then(Value::as_array)
        .map(|techs| {
            techs
                .iter()
                .filter_map(Value::as_str)
                .map(escape_html)
                .collect()
        })
        .unwrap_or_default()
}

fn grid_card(project: &Value, props: &ResolvedProperties<'_>, mode: RenderMode) -> String {
    let text_color = props.text("textColor");
    let primary = props.text("primaryColor");

    let image = field_text(project, "image");
    let cover = if image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}" class="w-full h-48 object-cover" />"#,
            escape_html(&image),
            escape_html(&field_text(project, "title")),
        )
    };

    let links = if props.flag("showLinks") {
        let mut links = Vec::new();
        let demo = field_text(project, "demoLink");
        if !demo.is_empty() {
            links.push(outbound_link(
                &demo,
                "text-sm font-medium",
                &style(&[("color", &primary)]),
                "Demo",
                mode.is_preview(),
            ));
        }
        let code = field_text(project, "githubLink");
        if !code.is_empty() {
            links.push(outbound_link(
                &code,
                "text-sm font-medium",
                &style(&[("color", &text_color)]),
                "Código",
                mode.is_preview(),
            ));
        }
        links.join(" ")
    } else {
        String::new()
    };

    let techs = if props.flag("showTechnologies") {
        let badge = style(&[("background-color", &tint(&primary, "15")), ("color", &primary)]);
        technologies(project)
            .iter()
            .map(|t| format!(r#"<span class="px-3 py-1 text-xs rounded-full" style="{}">{}</span>"#, badge, t))
            .collect::<Vec<_>>()
            .join("")
    } else {
        String::new()
    };

    format!(
        r#"<article class="{card}">
      {cover}
      <div class="p-6">
        <h3 class="text-xl font-bold mb-3" style="{color}">{title}</h3>
        <p class="text-sm mb-4" style="{muted}">{description}</p>
        <div class="flex flex-wrap gap-2 mb-4">{techs}</div>
        <div class="flex gap-4">{links}</div>
      </div>
    </article>"#,
        card = class(&["group overflow-hidden shadow-lg", &props.text("borderRadius")]),
        cover = cover,
        color = style(&[("color", &text_color)]),
        muted = style(&[("color", &text_color), ("opacity", "0.7")]),
        title = escape_html(&field_text(project, "title")),
        description = escape_html(&field_text(project, "description")),
        techs = techs,
        links = links,
    )
}

fn grid(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    let cards = props
        .list("projects")
        .iter()
        .filter(|p| p.is_object())
        .map(|p| grid_card(p, props, mode))
        .collect::<Vec<_>>()
        .join("\n    ");

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="{header}">
    <h2 class="{heading}" style="{color}">{title}</h2>
    <p class="text-xl max-w-2xl mx-auto" style="{muted}">{description}</p>
  </div>
  <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-8">
    {cards}
  </div>
</div>"#,
        root = root_class(mode, &[&props.text("padding"), "min-h-[600px]"]),
        root_style = style(&[("background-color", &props.text("backgroundColor"))]),
        header = class(&[&props.text("textAlign"), "mb-12"]),
        heading = class(&[&props.text("fontSize"), "font-bold mb-4"]),
        color = style(&[("color", &text_color)]),
        muted = style(&[("color", &text_color), ("opacity", "0.7")]),
        title = text(props, "title"),
        description = text(props, "description"),
        cards = cards,
    ))
}

fn minimal(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    let primary = props.text("primaryColor");
    let color = style(&[("color", &text_color)]);
    let muted = style(&[("color", &text_color), ("opacity", "0.7")]);
    let accent = style(&[("color", &primary)]);

    let rows = props
        .list("projects")
        .iter()
        .filter(|p| p.is_object())
        .map(|project| {
            let techs = technologies(project)
                .into_iter()
                .take(3)
                .collect::<Vec<_>>()
                .join(" · ");
            let demo = field_text(project, "demoLink");
            let link = if demo.is_empty() {
                String::new()
            } else {
                outbound_link(
                    &demo,
                    "ml-8 p-3 rounded-full border border-gray-300",
                    &accent,
                    "&#8599;",
                    mode.is_preview(),
                )
            };
            format!(
                r#"<div class="group py-8 border-b border-gray-200 last:border-b-0">
      <div class="flex items-center justify-between">
        <div class="flex-1">
          <div class="flex items-baseline gap-6 mb-3">
            <h3 class="text-2xl font-bold" style="{color}">{title}</h3>
            <span class="text-sm" style="{accent}">{techs}</span>
          </div>
          <p class="text-lg" style="{muted}">{description}</p>
        </div>
        {link}
      </div>
    </div>"#,
                color = color,
                accent = accent,
                muted = muted,
                title = escape_html(&field_text(project, "title")),
                description = escape_html(&field_text(project, "description")),
                techs = techs,
                link = link,
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="max-w-4xl mx-auto">
    <h2 class="text-4xl font-bold mb-16 text-center" style="{color}">{title}</h2>
    <div class="space-y-12">
    {rows}
    </div>
  </div>
</div>"#,
        root = root_class(mode, &[&props.text("padding"), "min-h-[400px]"]),
        root_style = style(&[("background-color", &props.text("backgroundColor"))]),
        color = color,
        title = text(props, "title"),
        rows = rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PropertyMap;

    fn render(index: usize, overrides: Value, mode: RenderMode) -> String {
        let entry = entry();
        let overrides: PropertyMap = serde_json::from_value(overrides).unwrap();
        let variant = &entry.variants[index];
        variant.render(&variant.resolve(&overrides), mode).into_string()
    }

    #[test]
    fn test_grid_renders_default_projects() {
        let html = render(0, json!({}), RenderMode::Public);
        assert_eq!(html.matches("<article").count(), 3);
        assert!(html.contains("Task Management App"));
        assert!(html.contains(r#"href="https://demo.com""#));
    }

    #[test]
    fn test_projects_override_replaces_list() {
        let html = render(
            0,
            json!({ "projects": [{ "title": "Solo", "technologies": ["Rust"] }] }),
            RenderMode::Public,
        );
        assert_eq!(html.matches("<article").count(), 1);
        assert!(html.contains("Solo"));
        assert!(!html.contains("E-commerce Platform"));
    }

    #[test]
    fn test_malformed_project_entries_are_skipped() {
        let html = render(0, json!({ "projects": ["oops", 3, { "title": "Ok" }] }), RenderMode::Public);
        assert_eq!(html.matches("<article").count(), 1);
    }

    #[test]
    fn test_links_are_inert_in_preview() {
        let html = render(0, json!({}), RenderMode::Preview);
        assert!(!html.contains("href="));
        assert!(html.contains("Demo"));
    }

    #[test]
    fn test_hidden_links_and_technologies() {
        let html = render(
            0,
            json!({ "showLinks": false, "showTechnologies": false }),
            RenderMode::Public,
        );
        assert!(!html.contains("href="));
        assert!(!html.contains(">MongoDB<"));
    }

    #[test]
    fn test_minimal_limits_technologies_to_three() {
        let html = render(
            1,
            json!({ "projects": [{ "title": "P", "technologies": ["a", "b", "c", "d"] }] }),
            RenderMode::Public,
        );
        assert!(html.contains("a · b · c"));
        assert!(!html.contains(" · d"));
    }

    #[test]
    fn test_project_links_drop_script_urls() {
        let html = render(
            0,
            json!({ "projects": [{
                "title": "Solo",
                "demoLink": "javascript:alert(1)",
                "githubLink": "data:text/html,<script>alert(1)</script>"
            }] }),
            RenderMode::Public,
        );
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("data:text/html"));
        assert!(html.contains("Demo"));
        assert!(html.contains("Código"));
    }
}
