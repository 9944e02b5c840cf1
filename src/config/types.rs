use serde_json::{Map, Value};

fn default_border_radius() -> String {
    "0px".to_string()
}

fn default_site_url() -> String {
    "/".to_string()
}

fn default_plain_section_glue() -> String {
    "\n \n".to_string()
}

fn default_newline() -> String {
    "\n".to_string()
}

fn default_wrap_chars() -> usize {
    76
}

/// Color roles used by the document template, links and buttons.
///
/// Deserializing a partial map fills the missing roles from [`Palette::default`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Palette {
    /// Background of everything outside the main content area.
    pub body_bg: String,
    /// Button and link color.
    pub primary: String,
    /// Background of the main content area.
    pub main_bg: String,
    /// Text color drawn on top of `primary`.
    pub primary_text: String,
    pub footer_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            body_bg: "#f6f6f6".to_string(),
            primary: "#34495e".to_string(),
            main_bg: "#ffffff".to_string(),
            primary_text: "#ffffff".to_string(),
            footer_color: "#999999".to_string(),
        }
    }
}

/// How plaintext sections are joined when the alternative body is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlueMode {
    /// Glue only between consecutive non-empty sections.
    #[default]
    Between,
    /// Byte-for-byte output of the legacy counter, which appends a trailing
    /// glue when a single section has content.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailType {
    #[default]
    Html,
    Text,
}

/// Transport-level settings. Keys the crate does not know about are kept in
/// `extra` and handed to the transport untouched.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MailSettings {
    #[serde(default, alias = "mailType")]
    pub mail_type: MailType,
    #[serde(default = "default_newline")]
    pub newline: String,
    #[serde(default = "default_wrap_chars", alias = "wrapChars")]
    pub wrap_chars: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            mail_type: MailType::default(),
            newline: default_newline(),
            wrap_chars: default_wrap_chars(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    #[serde(default)]
    pub colors: Palette,
    #[serde(default = "default_border_radius", alias = "borderRadius")]
    pub border_radius: String,
    #[serde(default = "default_site_url", alias = "siteUrl")]
    pub site_url: String,
    #[serde(default = "default_plain_section_glue")]
    pub plain_section_glue: String,
    #[serde(default)]
    pub glue_mode: GlueMode,
    #[serde(default)]
    pub mail: MailSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colors: Palette::default(),
            border_radius: default_border_radius(),
            site_url: default_site_url(),
            plain_section_glue: default_plain_section_glue(),
            glue_mode: GlueMode::default(),
            mail: MailSettings::default(),
        }
    }
}
