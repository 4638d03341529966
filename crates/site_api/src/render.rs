//! HTML rendering of assembled pages through handlebars templates.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};
use shared::error::SiteError;
use thiserror::Error;

use crate::view::{Page, PageBody};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.hbs")),
    ("home", include_str!("../templates/home.hbs")),
    ("services", include_str!("../templates/services.hbs")),
    ("service", include_str!("../templates/service.hbs")),
    ("about", include_str!("../templates/about.hbs")),
    ("contact", include_str!("../templates/contact.hbs")),
    ("document", include_str!("../templates/document.hbs")),
    ("not_found", include_str!("../templates/not_found.hbs")),
    (
        "layout_feature_list",
        include_str!("../templates/layout_feature_list.hbs"),
    ),
    (
        "layout_comparison",
        include_str!("../templates/layout_comparison.hbs"),
    ),
    (
        "layout_accordion",
        include_str!("../templates/layout_accordion.hbs"),
    ),
];

const PARTIALS: &[(&str, &str)] = &[
    ("navbar", include_str!("../templates/navbar.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
    ("page_hero", include_str!("../templates/page_hero.hbs")),
    ("card_carousel", include_str!("../templates/card_carousel.hbs")),
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template {name} is invalid: {source}")]
    Template {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },
    #[error("rendering {name} failed: {source}")]
    Render {
        name: &'static str,
        #[source]
        source: Box<handlebars::RenderError>,
    },
    #[error("view model could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<RenderError> for SiteError {
    fn from(err: RenderError) -> Self {
        SiteError::Render(err.to_string())
    }
}

/// Compiled templates. Cheap to clone; the registry is shared by handlers.
#[derive(Debug, Clone)]
pub struct Renderer {
    hb: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(escape_html);
        hb.register_helper("inc", Box::new(inc_helper));
        hb.register_helper("join", Box::new(join_helper));

        for &(name, source) in PARTIALS {
            hb.register_partial(name, source)
                .map_err(|source| RenderError::Template {
                    name,
                    source: Box::new(source),
                })?;
        }
        for &(name, source) in TEMPLATES {
            hb.register_template_string(name, source)
                .map_err(|source| RenderError::Template {
                    name,
                    source: Box::new(source),
                })?;
        }
        Ok(Self { hb })
    }

    fn render_value(&self, name: &'static str, data: &Value) -> Result<String, RenderError> {
        self.hb
            .render(name, data)
            .map_err(|source| RenderError::Render {
                name,
                source: Box::new(source),
            })
    }

    /// Renders `page` into a complete HTML document.
    pub fn render(&self, page: &Page) -> Result<String, SiteError> {
        Ok(self.render_page(page)?)
    }

    fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let chrome = serde_json::to_value(&page.chrome)?;
        let mut body = serde_json::to_value(&page.body)?;

        if let Value::Object(map) = &mut body {
            if let PageBody::Service(service) = &page.body {
                let layout = serde_json::to_value(&service.layout)?;
                let html = self.render_value(service.layout.template(), &layout)?;
                map.insert("layout_html".into(), Value::String(html));
            }
            map.insert("chrome".into(), chrome.clone());
        }

        let content = self.render_value(page.template(), &body)?;
        self.render_value("layout", &json!({ "chrome": chrome, "content": content }))
    }
}

/// Escapes text for element content and quoted attributes. Unlike the
/// handlebars default, `=` is left alone so query strings stay readable.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn inc_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
    out.write(&(value + 1).to_string())?;
    Ok(())
}

fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let separator = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(", ");
    let joined = h
        .param(0)
        .and_then(|v| v.value().as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(escape_html)
                .collect::<Vec<_>>()
                .join(separator)
        })
        .unwrap_or_default();
    out.write(&joined)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
