//! Contact sections.

use serde_json::json;

use super::{class, root_class, style, text, tint};
use crate::blocks::{BlockRegistryEntry, ComponentType, ResolvedProperties, VariantDescriptor};
use crate::render::html::{escape_html, outbound_link};
use crate::render::{Markup, RenderMode};

pub fn entry() -> BlockRegistryEntry {
    BlockRegistryEntry::new(ComponentType::Contact, "Contacto", "mail")
        .variant(VariantDescriptor::new(
            "Simple",
            "Contacto centrado con botón de email",
            json!({
                "title": "¡Hablemos!",
                "description": "¿Tienes un proyecto en mente? Me encantaría escuchar tus ideas y ayudarte a convertirlas en realidad.",
                "email": "contacto@ejemplo.com",
                "buttonText": "Enviar Mensaje",
                "showButton": true,
                "backgroundColor": "#f8fafc",
                "textColor": "#1f2937",
                "primaryColor": "#3b82f6",
                "fontSize": "text-4xl",
                "textAlign": "text-center",
                "padding": "p-12",
                "borderRadius": "rounded-2xl"
            }),
            simple,
        ))
        .variant(VariantDescriptor::new(
            "Tarjetas",
            "Contacto con tarjetas de información",
            json!({
                "title": "Conectemos",
                "description": "Elige la forma que prefieras para ponerte en contacto conmigo",
                "email": "contacto@ejemplo.com",
                "phone": "+34 123 456 789",
                "address": "Madrid, España",
                "responseTime": "Respuesta en 24h",
                "showSocial": true,
                "linkedinUrl": "https://linkedin.com",
                "githubUrl": "https://github.com",
                "backgroundColor": "#ffffff",
                "textColor": "#1f2937",
                "primaryColor": "#3b82f6",
                "fontSize": "text-3xl",
                "padding": "p-10",
                "borderRadius": "rounded-xl"
            }),
            cards,
        ))
}

fn mailto(props: &ResolvedProperties<'_>) -> String {
    format!("mailto:{}", props.text("email").trim())
}

fn tel(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", digits)
}

fn simple(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    let primary = props.text("primaryColor");
    let align = props.text("textAlign");

    let button = if props.flag("showButton") {
        outbound_link(
            &mailto(props),
            "inline-flex items-center gap-3 px-8 py-4 rounded-xl font-semibold text-lg",
            &style(&[("background-color", &primary), ("color", "#ffffff")]),
            &text(props, "buttonText"),
            mode.is_preview(),
        )
    } else {
        String::new()
    };

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="text-center max-w-2xl">
    <div class="w-20 h-20 rounded-full mx-auto mb-8 flex items-center justify-center" style="{badge}"><span class="text-white text-3xl" aria-hidden="true">&#9993;</span></div>
    <h2 class="{heading}" style="{color}">{title}</h2>
    <p class="{body}" style="{muted}">{description}</p>
    {button}
  </div>
</div>"#,
        root = root_class(
            mode,
            &[&props.text("padding"), &props.text("borderRadius"), "min-h-[400px] flex items-center justify-center"]
        ),
        root_style = style(&[("background-color", &props.text("backgroundColor"))]),
        badge = style(&[("background-color", &primary)]),
        heading = class(&[&props.text("fontSize"), "font-bold mb-4", &align]),
        body = class(&["text-xl mb-8 leading-relaxed", &align]),
        color = style(&[("color", &text_color)]),
        muted = style(&[("color", &text_color), ("opacity", "0.7")]),
        title = text(props, "title"),
        description = text(props, "description"),
        button = button,
    ))
}

fn cards(props: &ResolvedProperties<'_>, mode: RenderMode) -> Markup {
    let text_color = props.text("textColor");
    let primary = props.text("primaryColor");
    let card_class = "group block p-6 border-2 rounded-xl";
    let card_style = style(&[("border-color", &tint(&primary, "20"))]);
    let color = style(&[("color", &text_color)]);
    let muted = style(&[("color", &text_color), ("opacity", "0.6")]);

    let card_body = |label: &str, value: &str, note: &str| {
        format!(
            r#"<span class="block text-lg font-semibold mb-2" style="{color}">{label}</span><span class="block font-medium mb-1" style="{accent}">{value}</span><span class="block text-sm" style="{muted}">{note}</span>"#,
            color = color,
            accent = style(&[("color", &primary)]),
            muted = muted,
            label = label,
            value = value,
            note = note,
        )
    };

    let email = props.text("email");
    let phone = props.text("phone");
    let mut methods = Vec::with_capacity(3);
    methods.push(outbound_link(
        &mailto(props),
        card_class,
        &card_style,
        &card_body("Email", &escape_html(&email), &text(props, "responseTime")),
        mode.is_preview(),
    ));
    if !phone.trim().is_empty() {
        methods.push(outbound_link(
            &tel(&phone),
            card_class,
            &card_style,
            &card_body("Teléfono", &escape_html(&phone), "Lun - Vie, 9:00-18:00"),
            mode.is_preview(),
        ));
    }
    methods.push(format!(
        r#"<div class="{}" style="{}">{}</div>"#,
        card_class,
        card_style,
        card_body("Ubicación", &text(props, "address"), "Disponible remotamente"),
    ));

    let social = if props.flag("showSocial") {
        let links = [("LinkedIn", "linkedinUrl"), ("GitHub", "githubUrl")]
            .iter()
            .filter_map(|(label, key)| {
                let href = props.text(key);
                (!href.trim().is_empty()).then(|| {
                    outbound_link(
                        &href,
                        "px-4 py-2 rounded-lg border-2 font-medium",
                        &style(&[("border-color", &primary), ("color", &primary)]),
                        label,
                        mode.is_preview(),
                    )
                })
            })
            .collect::<Vec<_>>();
        if links.is_empty() {
            String::new()
        } else {
            format!(
                r#"<div class="flex justify-center gap-4">{}</div>"#,
                links.join("")
            )
        }
    } else {
        String::new()
    };

    Markup::from(format!(
        r#"<div class="{root}" style="{root_style}">
  <div class="text-center mb-12">
    <h2 class="{heading}" style="{color}">{title}</h2>
    <p class="text-lg max-w-2xl mx-auto" style="{muted}">{description}</p>
  </div>
  <div class="grid md:grid-cols-3 gap-6 mb-10">
    {methods}
  </div>
  {social}
</div>"#,
        root = root_class(mode, &[&props.text("padding"), &props.text("borderRadius"), "min-h-[500px]"]),
        root_style = style(&[("background-color", &props.text("backgroundColor"))]),
        heading = class(&[&props.text("fontSize"), "font-bold mb-4"]),
        color = color,
        muted = style(&[("color", &text_color), ("opacity", "0.7")]),
        title = text(props, "title"),
        description = text(props, "description"),
        methods = methods.join("\n    "),
        social = social,
    ))
}
