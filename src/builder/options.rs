use crate::button::Direction;
use crate::style::StyleDictionary;

/// Options for [`ContentBuilder::a`](crate::ContentBuilder::a).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Defaults to the configured site URL.
    pub url: Option<String>,
    pub label: String,
    pub styles: StyleDictionary,
    pub use_html: bool,
    pub use_plaintext: bool,
    /// Replaces `label` in the plaintext channel when non-empty.
    pub plaintext_label: Option<String>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            url: None,
            label: String::new(),
            styles: StyleDictionary::new(),
            use_html: true,
            use_plaintext: true,
            plaintext_label: None,
        }
    }
}

/// Options for [`ContentBuilder::btn`](crate::ContentBuilder::btn).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonOptions {
    /// Defaults to the configured site URL.
    pub url: Option<String>,
    pub label: String,
    pub plaintext_label: Option<String>,
    pub use_html: bool,
    pub use_plaintext: bool,
    pub align: String,
    /// CSS length for the button cell.
    pub width: Option<String>,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            url: None,
            label: String::new(),
            plaintext_label: None,
            use_html: true,
            use_plaintext: true,
            align: "left".to_string(),
            width: None,
        }
    }
}

/// Options for [`ContentBuilder::btn_group`](crate::ContentBuilder::btn_group).
///
/// `urls`, `labels` and `plaintext_labels` are matched by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonGroupOptions {
    pub urls: Vec<String>,
    pub labels: Vec<String>,
    pub plaintext_labels: Vec<String>,
    pub use_html: bool,
    pub use_plaintext: bool,
    pub direction: Direction,
    pub align: String,
    pub width: Option<String>,
    /// Pixels between buttons, 0 for none.
    pub spacer_w: u32,
    pub spacer_h: u32,
}

impl Default for ButtonGroupOptions {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            labels: Vec::new(),
            plaintext_labels: Vec::new(),
            use_html: true,
            use_plaintext: true,
            direction: Direction::Vertical,
            align: "left".to_string(),
            width: None,
            spacer_w: 0,
            spacer_h: 0,
        }
    }
}
