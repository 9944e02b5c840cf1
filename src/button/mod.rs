//! Button and button-group layout as nested email-safe tables.
//!
//! Everything here is a pure function of its inputs: the caller decides where
//! the resulting fragments go.

use crate::config::Palette;
use crate::markup::escape_html;
use crate::MailweaveError;

pub const UNWRAP_OPEN: &str = "{unwrap}";
pub const UNWRAP_CLOSE: &str = "{/unwrap}";

/// Wrap `url` in the markers that keep the transport from line-wrapping it.
pub fn wrap_url(url: &str) -> String {
    format!("{UNWRAP_OPEN}{url}{UNWRAP_CLOSE}")
}

/// Plaintext rendition of a link: the label, then the wrapped URL, each on
/// its own line.
pub fn plain_link(label: &str, url: &str, newline: &str) -> String {
    format!("{label}{newline}{}{newline}", wrap_url(url))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// One row per button.
    #[default]
    Vertical,
    /// All buttons side by side in a single row.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub url: String,
    pub label: String,
    /// Replaces `label` in the plaintext channel.
    pub plaintext_label: Option<String>,
}

impl Button {
    pub fn plain_label(&self) -> &str {
        self.plaintext_label.as_deref().unwrap_or(&self.label)
    }
}

/// Arrangement and channel selection shared by every button of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLayout {
    pub direction: Direction,
    pub align: String,
    /// CSS length applied to every button cell, e.g. `"50%"` or `"200px"`.
    pub width: Option<String>,
    /// Spacer width in pixels, 0 for none.
    pub spacer_w: u32,
    /// Spacer height in pixels, 0 for none.
    pub spacer_h: u32,
    pub use_html: bool,
    pub use_plaintext: bool,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            direction: Direction::Vertical,
            align: "left".to_string(),
            width: None,
            spacer_w: 0,
            spacer_h: 0,
            use_html: true,
            use_plaintext: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonGroupSpec {
    pub buttons: Vec<Button>,
    pub layout: GroupLayout,
}

impl ButtonGroupSpec {
    /// Zip positional lists into buttons.
    ///
    /// Every URL needs a label. A missing or empty plaintext label falls back
    /// to the HTML label.
    pub fn from_lists(
        urls: &[String],
        labels: &[String],
        plaintext_labels: &[String],
        layout: GroupLayout,
    ) -> crate::Result<Self> {
        let buttons = urls
            .iter()
            .enumerate()
            .map(|(i, url)| -> crate::Result<Button> {
                let label = labels.get(i).ok_or(MailweaveError::IndexOutOfRange {
                    field: "labels",
                    index: i,
                    len: labels.len(),
                })?;
                Ok(Button {
                    url: url.clone(),
                    label: label.clone(),
                    plaintext_label: plaintext_labels.get(i).filter(|l| !l.is_empty()).cloned(),
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Self { buttons, layout })
    }
}

/// Colors and formatting the generator reads but never changes.
#[derive(Debug, Clone, Copy)]
pub struct ButtonTheme<'a> {
    pub palette: &'a Palette,
    pub border_radius: &'a str,
    pub newline: &'a str,
    /// HTML-escape labels.
    pub escape: bool,
}

/// Output of a layout call. `plain` holds one entry per button, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonFragments {
    pub plain: Vec<String>,
    pub html: Option<String>,
}

pub fn single_button(button: Button, layout: &GroupLayout, theme: &ButtonTheme<'_>) -> ButtonFragments {
    let spec = ButtonGroupSpec {
        buttons: vec![button],
        layout: GroupLayout {
            direction: Direction::Vertical,
            ..layout.clone()
        },
    };
    button_group(&spec, theme)
}

pub fn button_group(spec: &ButtonGroupSpec, theme: &ButtonTheme<'_>) -> ButtonFragments {
    let layout = &spec.layout;
    let plain = if layout.use_plaintext {
        spec.buttons
            .iter()
            .map(|b| plain_link(b.plain_label(), &b.url, theme.newline))
            .collect()
    } else {
        Vec::new()
    };
    let html = layout.use_html.then(|| group_html(spec, theme));
    ButtonFragments { plain, html }
}

fn group_html(spec: &ButtonGroupSpec, theme: &ButtonTheme<'_>) -> String {
    let layout = &spec.layout;
    let horizontal = layout.direction == Direction::Horizontal;
    let mut out = String::from(
        "<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\" class=\"btn btn-primary\" \
         style=\"border-collapse: separate; mso-table-lspace: 0pt; mso-table-rspace: 0pt; width: 100%; box-sizing: border-box;\"><tbody>",
    );
    if horizontal {
        out.push_str("<tr>");
    }
    for (i, button) in spec.buttons.iter().enumerate() {
        if i > 0 {
            if let Some(spacer) = spacer_cell(layout.spacer_w, layout.spacer_h) {
                if horizontal {
                    out.push_str(&spacer);
                } else {
                    out.push_str(&format!("<tr>{spacer}</tr>"));
                }
            }
        }
        let cell = button_cell(button, layout, theme);
        if horizontal {
            out.push_str(&cell);
        } else {
            out.push_str(&format!("<tr>{cell}</tr>"));
        }
    }
    if horizontal {
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// `None` when both dimensions are zero; a zero dimension is left out.
fn spacer_cell(width: u32, height: u32) -> Option<String> {
    if width == 0 && height == 0 {
        return None;
    }
    let mut attrs = String::new();
    let mut style = String::new();
    if width > 0 {
        attrs.push_str(&format!(" width=\"{width}\""));
        style.push_str(&format!("width:{width}px; "));
    }
    if height > 0 {
        attrs.push_str(&format!(" height=\"{height}\""));
        style.push_str(&format!("height:{height}px; "));
    }
    Some(format!("<td{attrs} style=\"{style}\">&nbsp;</td>"))
}

fn button_cell(button: &Button, layout: &GroupLayout, theme: &ButtonTheme<'_>) -> String {
    let label = if theme.escape {
        escape_html(&button.label)
    } else {
        button.label.clone()
    };
    let bg = &theme.palette.primary;
    let fg = &theme.palette.primary_text;
    let radius = theme.border_radius;
    let align = escape_html(&layout.align);

    // A fixed cell width only holds if the inner table and anchor stretch too.
    let (cell_width_attr, cell_width_style, table_width_attr, table_width, anchor_width) =
        match layout.width.as_deref().filter(|w| !w.is_empty()) {
            Some(width) => {
                let width = escape_html(width);
                (
                    format!(" width=\"{width}\""),
                    format!("width: {width}; "),
                    " width=\"100%\"",
                    "100%",
                    " width: 100%;",
                )
            }
            None => (String::new(), String::new(), "", "auto", ""),
        };

    format!(
        "<td{cell_width_attr} align=\"{align}\" style=\"{cell_width_style}font-family: sans-serif; font-size: 14px; vertical-align: top; padding-bottom: 15px;\">\
         <table{table_width_attr} border=\"0\" cellpadding=\"0\" cellspacing=\"0\" style=\"border-collapse: separate; mso-table-lspace: 0pt; mso-table-rspace: 0pt; width: {table_width};\"><tbody><tr>\
         <td style=\"font-family: sans-serif; font-size: 14px; vertical-align: top; background-color: {bg}; border-radius: {radius}; text-align: center;\">\
         <a href=\"{href}\" target=\"_blank\" style=\"display: inline-block; color: {fg}; background-color: {bg}; border: solid 1px {bg}; border-radius: {radius}; box-sizing: border-box; cursor: pointer; text-decoration: none; font-size: 14px; font-weight: bold; margin: 0; padding: 12px 25px; text-transform: capitalize; border-color: {bg};{anchor_width}\">{label}</a>\
         </td></tr></tbody></table></td>",
        href = wrap_url(&button.url),
    )
}
