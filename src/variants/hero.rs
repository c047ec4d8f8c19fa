//! Hero sections.

use serde_json::json;

use super::{class, root_class, style, text, tint};
use crate::blocks::{BlockRegistryEntry, ComponentType, ResolvedProperties, VariantDescriptor};
use crate::render::html::{escape_html, outbound_link, scroll_link};
use crate::render::{Markup, RenderMode};

pub fn entry() -> BlockRegistryEntry {
    BlockRegistryEntry::new(ComponentType::Hero, "Hero", "code")
        .variant(VariantDescriptor::new(
            "Minimalista",
            "Hero con gradiente y diseño centrado",
            json!({
                "title": "¡Hola, soy Desarrollador!",
                "subtitle": "Creando experiencias digitales increíbles",
                "primaryColor": "#6366f1",
                "secondaryColor": "#9333ea",
                "textColor": "#ffffff",
                "padding": "p-8",
                "borderRadius": "rounded-xl",
                "textAlign": "text-center",
                "buttonText": "Ver mi trabajo",
                "showButton": true,
                "scrollTarget": "projects"
            }),
            minimal,
        ))
        .variant(VariantDescriptor::new(
            "Social",
            "Hero oscuro con redes sociales y CTA",
            json!({
                "name": "Alex Developer",
                "title": "Full Stack Developer",
                "subtitle": "Construyo productos digitales rápidos, accesibles y bien diseñados",
                "backgroundColor": "#111827",
                "textColor": "#f9fafb",
                "primaryColor": "#6366f1",
                "padding": "p-12",
                "githubLink": "https://github.com",
                "linkedinLink": "https://linkedin.com",
                "twitterLink": "",
                "showSocial": true,
                "buttonText": "Contáctame",
                "showButton": true,
                "scrollTarget": "contact"
            }),
            social,
        ))
        .variant(VariantDescriptor::new(
            "Con Fondo",
            "Hero con imagen de fondo y overlay",
            json!({
                "title": "Diseño y desarrollo para la web",
                "subtitle": "Interfaces cuidadas, código mantenible y productos que funcionan",
                "backgroundImage": "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=1600&h=900&fit=crop",
                "overlayColor": "#000000",
                "overlayOpacity": "0.6",
                "textColor": "#ffffff",
                "primaryColor": "#3b82f6",
                "padding": "p-16",
                "borderRadius": "rounded-xl",
                "buttonText": "Explorar proyectos",
                "showButton": true,
                "scrollTarget": "projects"
            }),
            with_background,
        ))
        .variant(VariantDescriptor::new(
            "Asimétrico",
            "Hero con diseño de dos columnas",
            json!({
                "name": "María López",
                "title": "Desarrolladora Frontend",
                "description": "Transformo ideas en interfaces claras y rápidas. Trabajo con React, TypeScript y mucho café.",
                "profileImage": "https://images.unsplash.com/photo-1494790108755-2616b612b372?w=400&h=400&fit=crop&crop=face",
                "backgroundColor": "#ffffff",
                "textColor": "#111827",
                "primaryColor": "#0ea5e9",
                "padding": "p-12",
                "buttonText": "Ver proyectos",
                "showButton": true,
                "scrollTarget": "projects",
                "cvButtonText": "Descargar CV",
                "cvLink": ""
            }),
            asymmetric,
        ))
}

fn cta(props: &ResolvedProperties<'_>, mode: RenderMode, class_attr: &str, style_attr: &str) -> String {
    if !props.flag("showButton") {
        return String::new();
    }
    scroll_link(
        &props.text("scrollTarget"),
        class_attr,
        style_attr,
        &text(props, "buttonText"),
        mode.is_preview(),
    )
}

fn minimal(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let primary = props.text("primaryColor");
    let secondary = props.text("secondaryColor");
    let gradient = format!("linear-gradient(to right, {}, {})", primary, secondary);
    let button = cta(
        props,
        mode,
        "inline-block bg-white px-6 py-3 rounded-full font-semibold",
        &style(&[("color", &primary)]),
    );

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="{align}">
    <h1 class="text-3xl md:text-4xl font-bold mb-4">{title}</h1>
    <p class="text-lg opacity-90 mb-6">{subtitle}</p>
    {button}
  </div>
</div>"#,
        root = root_class(mode, &[&props.text("padding"), &props.text("borderRadius")]),
        root_style = style(&[("background", &gradient), ("color", &props.text("textColor"))]),
        align = class(&[&props.text("textAlign")]),
        title = text(props, "title"),
        subtitle = text(props, "subtitle"),
        button = button,
    ))
}

fn social(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let primary = props.text("primaryColor");
    let text_color = props.text("textColor");
    let link_style = style(&[("border-color", &tint(&text_color, "30")), ("color", &text_color)]);

    let socials = if props.flag("showSocial") {
        [("githubLink", "GitHub"), ("linkedinLink", "LinkedIn"), ("twitterLink", "Twitter")]
            .iter()
            .filter(|(key, _)| !props.text(key).is_empty())
            .map(|(key, label)| {
                outbound_link(
                    &props.text(key),
                    "px-4 py-2 rounded-full border text-sm",
                    &link_style,
                    label,
                    mode.is_preview(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n      ")
    } else {
        String::new()
    };

    let button = cta(
        props,
        mode,
        "inline-block px-8 py-3 rounded-lg font-semibold",
        &style(&[("background-color", &primary), ("color", "#ffffff")]),
    );

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="max-w-3xl mx-auto text-center">
    <p class="text-sm uppercase tracking-widest mb-3" style="{accent}">{title}</p>
    <h1 class="text-4xl md:text-5xl font-bold mb-4">{name}</h1>
    <p class="text-lg opacity-80 mb-8">{subtitle}</p>
    <div class="flex flex-wrap justify-center gap-3 mb-8">
      {socials}
    </div>
    {button}
  </div>
</div>"#,
        root = root_class(mode, &[&props.text("padding"), "rounded-xl"]),
        root_style = style(&[
            ("background-color", &props.text("backgroundColor")),
            ("color", &text_color)
        ]),
        accent = style(&[("color", &primary)]),
        title = text(props, "title"),
        name = text(props, "name"),
        subtitle = text(props, "subtitle"),
        socials = socials,
        button = button,
    ))
}

fn with_background(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let image = props.text("backgroundImage");
    let background = if image.is_empty() {
        String::new()
    } else {
        format!("url('{}') center / cover no-repeat", image.replace('\'', "%27"))
    };
    let button = cta(
        props,
        mode,
        "inline-block px-8 py-3 rounded-lg font-semibold",
        &style(&[("background-color", &props.text("primaryColor")), ("color", "#ffffff")]),
    );

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="absolute inset-0" style="{overlay}"></div>
  <div class="relative z-10 text-center max-w-3xl mx-auto">
    <h1 class="text-4xl md:text-6xl font-bold mb-6">{title}</h1>
    <p class="text-xl opacity-90 mb-8">{subtitle}</p>
    {button}
  </div>
</div>"#,
        root = root_class(
            mode,
            &[&props.text("padding"), &props.text("borderRadius"), "relative overflow-hidden min-h-[500px] flex items-center justify-center"]
        ),
        root_style = style(&[("background", &background), ("color", &props.text("textColor"))]),
        overlay = style(&[
            ("background-color", &props.text("overlayColor")),
            ("opacity", &props.text("overlayOpacity"))
        ]),
        title = text(props, "title"),
        subtitle = text(props, "subtitle"),
        button = button,
    ))
}

fn asymmetric(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let primary = props.text("primaryColor");
    let button = cta(
        props,
        mode,
        "inline-block px-6 py-3 rounded-lg font-semibold",
        &style(&[("background-color", &primary), ("color", "#ffffff")]),
    );
    let cv = outbound_link(
        &props.text("cvLink"),
        "inline-block px-6 py-3 rounded-lg font-semibold border",
        &style(&[("border-color", &primary), ("color", &primary)]),
        &text(props, "cvButtonText"),
        mode.is_preview(),
    );
    let image = props.text("profileImage");
    let photo = if image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}" class="w-64 h-64 rounded-2xl object-cover shadow-xl" style="{}" />"#,
            escape_html(&image),
            text(props, "name"),
            style(&[("border", &format!("4px solid {}", primary))]),
        )
    };

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="grid md:grid-cols-5 gap-10 items-center">
    <div class="md:col-span-3">
      <p class="text-sm font-semibold mb-2" style="{accent}">{title}</p>
      <h1 class="text-4xl md:text-5xl font-bold mb-6">{name}</h1>
      <p class="text-lg opacity-80 mb-8">{description}</p>
      <div class="flex flex-wrap gap-4">
        {button}
        {cv}
      </div>
    </div>
    <div class="md:col-span-2 flex justify-center">{photo}</div>
  </div>
</div>"#,
        root = root_class(mode, &[&props.text("padding"), "rounded-xl"]),
        root_style = style(&[
            ("background-color", &props.text("backgroundColor")),
            ("color", &props.text("textColor"))
        ]),
        accent = style(&[("color", &primary)]),
        title = text(props, "title"),
        name = text(props, "name"),
        description = text(props, "description"),
        button = button,
        cv = cv,
        photo = photo,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PropertyMap;
    use serde_json::Value;

    fn render(index: usize, overrides: Value, mode: RenderMode) -> String {
        let entry = entry();
        let overrides: PropertyMap = serde_json::from_value(overrides).unwrap();
        let variant = &entry.variants[index];
        variant.render(&variant.resolve(&overrides), mode).into_string()
    }

    #[test]
    fn test_minimal_uses_defaults() {
        let html = render(0, json!({}), RenderMode::Public);
        assert!(html.contains("¡Hola, soy Desarrollador!"));
        assert!(html.contains(r##"href="#projects""##));
    }

    #[test]
    fn test_minimal_title_override_is_escaped() {
        let html = render(0, json!({ "title": "<b>Hi</b>" }), RenderMode::Public);
        assert!(html.contains("&lt;b&gt;Hi&lt;/b&gt;"));
        assert!(!html.contains("<b>Hi</b>"));
    }

    #[test]
    fn test_preview_suppresses_scroll_but_keeps_structure() {
        let public = render(0, json!({}), RenderMode::Public);
        let preview = render(0, json!({}), RenderMode::Preview);

        assert!(public.contains("data-scroll-target"));
        assert!(!preview.contains("data-scroll-target"));
        assert!(!preview.contains("href="));
        assert!(preview.contains("Ver mi trabajo"));
        assert!(preview.contains("scale-75 pointer-events-none"));
    }

    #[test]
    fn test_hidden_button_is_not_rendered() {
        let html = render(0, json!({ "showButton": false }), RenderMode::Public);
        assert!(!html.contains("Ver mi trabajo"));
    }

    #[test]
    fn test_social_links_skip_empty_and_go_inert_in_preview() {
        let public = render(1, json!({}), RenderMode::Public);
        assert!(public.contains(r#"href="https://github.com""#));
        assert!(!public.contains("Twitter"));

        let preview = render(1, json!({ "twitterLink": "https://x.com/me" }), RenderMode::Preview);
        assert!(preview.contains("Twitter"));
        assert!(!preview.contains("href="));
    }

    #[test]
    fn test_background_and_asymmetric_render() {
        let bg = render(2, json!({ "backgroundImage": "" }), RenderMode::Public);
        assert!(bg.contains("Diseño y desarrollo para la web"));
        assert!(!bg.contains("url("));

        let asym = render(3, json!({ "cvLink": "https://cv.example/me.pdf" }), RenderMode::Public);
        assert!(asym.contains(r#"href="https://cv.example/me.pdf""#));
        assert!(asym.contains("María López"));
    }

    #[test]
    fn test_social_links_drop_script_urls() {
        let html = render(
            1,
            json!({ "githubLink": "javascript:alert(document.cookie)" }),
            RenderMode::Public,
        );
        assert!(!html.contains("javascript:"));
        assert!(html.contains("GitHub"));
        assert!(html.contains(r#"href="https://linkedin.com""#));
    }

    #[test]
    fn test_unknown_scroll_target_is_not_wired() {
        let html = render(
            1,
            json!({ "scrollTarget": "contact\"]'),alert(1)//" }),
            RenderMode::Public,
        );
        assert!(!html.contains("data-scroll-target"));
        assert!(html.contains("Contáctame"));

        let html = render(1, json!({ "scrollTarget": "projects" }), RenderMode::Public);
        assert!(html.contains(r#"data-scroll-target="projects""#));
    }
}
