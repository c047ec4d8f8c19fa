//! "About me" sections.

use serde_json::json;

use super::{class, root_class, style, text, tint};
use crate::blocks::{BlockRegistryEntry, ComponentType, ResolvedProperties, VariantDescriptor};
use crate::render::html::escape_html;
use crate::render::{Markup, RenderMode};

pub fn entry() -> BlockRegistryEntry {
    BlockRegistryEntry::new(ComponentType::About, "Sobre Mí", "user")
        .variant(VariantDescriptor::new(
            "Simple",
            "Sobre mí en formato texto simple",
            json!({
                "title": "Sobre Mí",
                "description": "Desarrollador Full Stack apasionado por crear experiencias digitales increíbles. Con más de 5 años de experiencia en el desarrollo web, me especializo en crear aplicaciones modernas, escalables y centradas en el usuario.",
                "backgroundColor": "#f0f9ff",
                "textColor": "#1f2937",
                "primaryColor": "#3b82f6",
                "fontSize": "text-xl",
                "textAlign": "text-left",
                "padding": "p-8",
                "borderRadius": "rounded-xl"
            }),
            simple,
        ))
        .variant(VariantDescriptor::new(
            "Con Icono",
            "Sobre mí con icono destacado",
            json!({
                "title": "Sobre Mí",
                "description": "Desarrollador Full Stack apasionado por crear experiencias digitales increíbles. Me especializo en tecnologías modernas como React, Node.js, y bases de datos tanto SQL como NoSQL.",
                "backgroundColor": "#f0f9ff",
                "textColor": "#1f2937",
                "primaryColor": "#3b82f6",
                "iconColor": "#ffffff",
                "showIcon": true,
                "fontSize": "text-xl",
                "padding": "p-8",
                "borderRadius": "rounded-xl"
            }),
            with_icon,
        ))
        .variant(VariantDescriptor::new(
            "Con Foto",
            "Sobre mí con foto de perfil",
            json!({
                "name": "Juan Pérez",
                "role": "Desarrollador Full Stack",
                "description": "Desarrollador apasionado con 5+ años de experiencia creando aplicaciones web modernas y escalables. Mi experiencia abarca desde el desarrollo frontend con React y Vue.js hasta backend con Node.js y Python.",
                "profileImage": "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=200&h=200&fit=crop&crop=face",
                "backgroundColor": "#ffffff",
                "textColor": "#1f2937",
                "primaryColor": "#6366f1",
                "padding": "p-10",
                "borderRadius": "rounded-2xl"
            }),
            with_photo,
        ))
        .variant(VariantDescriptor::new(
            "Con Habilidades",
            "Sobre mí con lista de tecnologías",
            json!({
                "name": "Laura Martín",
                "role": "Full Stack Developer",
                "description": "Desarrolladora especializada en React, Node.js y tecnologías cloud. Mi pasión por la tecnología me ha llevado a dominar tanto el frontend como el backend, permitiéndome crear aplicaciones completas desde la concepción hasta el despliegue.",
                "profileImage": "https://images.unsplash.com/photo-1494790108755-2616b612b372?w=200&h=200&fit=crop&crop=face",
                "skillsTitle": "Tecnologías & Herramientas",
                "skills": ["React", "Node.js", "TypeScript", "AWS", "Docker", "PostgreSQL", "MongoDB", "GraphQL"],
                "backgroundColor": "#f1f5f9",
                "textColor": "#0f172a",
                "primaryColor": "#3b82f6",
                "padding": "p-10",
                "borderRadius": "rounded-xl"
            }),
            with_skills,
        ))
}

fn frame_style(props: &ResolvedProperties<'_>, alpha: &str) -> String {
    style(&[
        ("background-color", &props.text("backgroundColor")),
        ("border-color", &tint(&props.text("primaryColor"), alpha)),
    ])
}

fn simple(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    Markup::from(format!(
        r#"<div class="{root}" style="{frame}">
  <h3 class="{heading}" style="{color}">{title}</h3>
  <p class="{body}" style="{muted}">{description}</p>
</div>"#,
        root = root_class(
            mode,
            &[&props.text("padding"), &props.text("borderRadius"), "border min-h-[300px] flex flex-col justify-center"]
        ),
        frame = frame_style(props, "33"),
        heading = class(&[&props.text("fontSize"), "font-bold mb-4", &props.text("textAlign")]),
        body = class(&[&props.text("textAlign"), "text-lg leading-relaxed"]),
        color = style(&[("color", &text_color)]),
        muted = style(&[("color", &text_color), ("opacity", "0.8")]),
        title = text(props, "title"),
        description = text(props, "description"),
    ))
}

fn with_icon(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    let icon = if props.flag("showIcon") {
        format!(
            r#"<div class="w-20 h-20 rounded-full flex items-center justify-center flex-shrink-0" style="{}"><span class="text-3xl" aria-hidden="true" style="{}">&#128100;</span></div>"#,
            style(&[("background-color", &props.text("primaryColor"))]),
            style(&[("color", &props.text("iconColor"))]),
        )
    } else {
        String::new()
    };

    Markup::from(format!(
        r#"<div class="{root}" style="{frame}">
  <div class="flex flex-col md:flex-row items-center gap-6 w-full">
    {icon}
    <div class="flex-1 text-center md:text-left">
      <h3 class="{heading}" style="{color}">{title}</h3>
      <p class="text-lg leading-relaxed" style="{muted}">{description}</p>
    </div>
  </div>
</div>"#,
        root = root_class(
            mode,
            &[&props.text("padding"), &props.text("borderRadius"), "border min-h-[350px] flex items-center"]
        ),
        frame = frame_style(props, "33"),
        icon = icon,
        heading = class(&[&props.text("fontSize"), "font-bold mb-4"]),
        color = style(&[("color", &text_color)]),
        muted = style(&[("color", &text_color), ("opacity", "0.8")]),
        title = text(props, "title"),
        description = text(props, "description"),
    ))
}

fn profile_image(props: &ResolvedProperties<'_>, class_attr: &str) -> String {
    let src = props.text("profileImage");
    if src.is_empty() {
        return String::new();
    }
    format!(
        r#"<img src="{}" alt="{}" class="{}" style="{}" />"#,
        escape_html(&src),
        text(props, "name"),
        class_attr,
        style(&[("border-color", &props.text("primaryColor"))]),
    )
}

fn with_photo(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    let primary = props.text("primaryColor");
    Markup::from(format!(
        r#"<div class="{root}" style="{frame}">
  <div class="flex flex-col lg:flex-row items-center gap-8 w-full">
    <div class="relative flex-shrink-0">{photo}</div>
    <div class="flex-1 text-center lg:text-left">
      <h3 class="text-3xl font-bold mb-2" style="{color}">{name}</h3>
      <p class="text-xl font-medium mb-4" style="{accent}">{role}</p>
      <p class="text-lg leading-relaxed" style="{muted}">{description}</p>
    </div>
  </div>
</div>"#,
        root = root_class(
            mode,
            &[&props.text("padding"), &props.text("borderRadius"), "shadow-lg border min-h-[400px] flex items-center"]
        ),
        frame = frame_style(props, "20"),
        photo = profile_image(props, "w-40 h-40 rounded-full object-cover border-4 shadow-lg"),
        color = style(&[("color", &text_color)]),
        accent = style(&[("color", &primary)]),
        muted = style(&[("color", &text_color), ("opacity", "0.8")]),
        name = text(props, "name"),
        role = text(props, "role"),
        description = text(props, "description"),
    ))
}

fn with_skills(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    let primary = props.text("primaryColor");
    let badge = style(&[("background-color", &tint(&primary, "20")), ("color", &primary)]);
    let skills = props
        .text_list("skills")
        .iter()
        .map(|skill| {
            format!(
                r#"<span class="px-4 py-2 rounded-full text-sm font-medium" style="{}">{}</span>"#,
                badge,
                escape_html(skill)
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    Markup::from(format!(
        r#"<div class="{root}" style="{frame}">
  <div class="grid lg:grid-cols-2 gap-10 items-center w-full">
    <div>
      <div class="flex items-center gap-6 mb-6">
        {photo}
        <div>
          <h3 class="text-2xl font-bold mb-1" style="{color}">{name}</h3>
          <p class="text-lg" style="{accent}">{role}</p>
        </div>
      </div>
      <p class="text-lg leading-relaxed" style="{muted}">{description}</p>
    </div>
    <div>
      <h4 class="text-xl font-semibold mb-6" style="{color}">{skills_title}</h4>
      <div class="flex flex-wrap gap-3">
        {skills}
      </div>
    </div>
  </div>
</div>"#,
        root = root_class(
            mode,
            &[&props.text("padding"), &props.text("borderRadius"), "border shadow-sm min-h-[400px] flex items-center"]
        ),
        frame = frame_style(props, "20"),
        photo = profile_image(props, "w-20 h-20 rounded-full object-cover border-2"),
        color = style(&[("color", &text_color)]),
        accent = style(&[("color", &primary)]),
        muted = style(&[("color", &text_color), ("opacity", "0.8")]),
        name = text(props, "name"),
        role = text(props, "role"),
        description = text(props, "description"),
        skills_title = text(props, "skillsTitle"),
        skills = skills,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PropertyMap;
    use serde_json::Value;

    fn render(index: usize, overrides: Value) -> String {
        let entry = entry();
        let overrides: PropertyMap = serde_json::from_value(overrides).unwrap();
        let variant = &entry.variants[index];
        variant
            .render(&variant.resolve(&overrides), RenderMode::Public)
            .into_string()
    }

    #[test]
    fn test_simple_defaults() {
        let html = render(0, json!({}));
        assert!(html.contains("Sobre Mí"));
        assert!(html.contains("background-color: #f0f9ff"));
        assert!(html.contains("border-color: #3b82f633"));
    }

    #[test]
    fn test_icon_can_be_hidden() {
        assert!(render(1, json!({})).contains("&#128100;"));
        assert!(!render(1, json!({ "showIcon": false })).contains("&#128100;"));
    }

    #[test]
    fn test_skills_override_replaces_default_list() {
        let html = render(3, json!({ "skills": ["Rust", "Tokio"] }));
        assert!(html.contains(">Rust<"));
        assert!(html.contains(">Tokio<"));
        assert!(!html.contains(">React<"));
        assert!(!html.contains(">GraphQL<"));
    }

    #[test]
    fn test_default_skills_render() {
        let html = render(3, json!({}));
        for skill in ["React", "Docker", "GraphQL"] {
            assert!(html.contains(&format!(">{}<", skill)));
        }
    }

    #[test]
    fn test_empty_profile_image_renders_no_img() {
        assert!(render(2, json!({})).contains("<img"));
        assert!(!render(2, json!({ "profileImage": "" })).contains("<img"));
    }

    #[test]
    fn test_string_skills_keep_default_list() {
        let html = render(3, json!({ "skills": "Rust" }));
        assert!(html.contains(">React<"));
        assert!(!html.contains(">Rust<"));
    }
}
