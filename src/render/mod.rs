use std::path::Path;

use serde::Serialize;

use crate::config::Palette;
use crate::MailweaveError;

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/email.hbs");
const TEMPLATE_NAME: &str = "email";

/// Per-section HTML handed to the document template.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionHtml<'a> {
    pub preheader: &'a str,
    pub body: &'a str,
    pub footer: &'a str,
}

/// Everything a document template may reference.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderContext<'a> {
    pub sections: SectionHtml<'a>,
    pub colors: &'a Palette,
    pub border_radius: &'a str,
    /// Already HTML-escaped; empty when no subject was set.
    pub title: &'a str,
}

/// Turns section fragments into a complete HTML document.
///
/// Implementations must render the preheader (hidden) and footer only when
/// they are non-empty, and always render the body.
pub trait TemplateRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> crate::Result<String>;
}

/// Handlebars-backed renderer. Values are inserted without escaping since the
/// section fragments are already markup.
pub struct HandlebarsRenderer {
    hbs: handlebars::Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Renderer for the built-in responsive single-column layout.
    pub fn new() -> crate::Result<Self> {
        Self::from_template_str(DEFAULT_TEMPLATE)
    }

    pub fn from_template_str(template: &str) -> crate::Result<Self> {
        let mut hbs = make_handlebars();
        hbs.register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| MailweaveError::TemplateRegister {
                reason: e.to_string(),
            })?;
        Ok(Self { hbs })
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let template = std::fs::read_to_string(path).map_err(|source| MailweaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_template_str(&template)
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> crate::Result<String> {
        self.hbs
            .render(TEMPLATE_NAME, ctx)
            .map_err(|e| MailweaveError::TemplateRender {
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsRenderer").finish_non_exhaustive()
    }
}

fn make_handlebars() -> handlebars::Handlebars<'static> {
    let mut hbs = handlebars::Handlebars::new();
    hbs.set_strict_mode(true);
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}
