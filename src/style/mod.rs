use indexmap::IndexMap;

use crate::config::Palette;

/// Ordered CSS property to value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDictionary {
    entries: IndexMap<String, String>,
}

impl StyleDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut dict = Self::new();
        for (key, value) in pairs {
            dict.set(key, value);
        }
        dict
    }

    /// Set `key`. An existing key keeps its position and takes the new value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Layer `overrides` on top of `self`.
    ///
    /// Keys of `self` keep their position and take the override value when
    /// one exists; keys only present in `overrides` follow, in their order.
    pub fn merged(&self, overrides: &StyleDictionary) -> StyleDictionary {
        let mut out = self.clone();
        for (key, value) in &overrides.entries {
            out.entries.insert(key.clone(), value.clone());
        }
        out
    }

    /// Serialize as `key:value; ` pairs. The trailing space is kept so the
    /// result can be concatenated with further declarations.
    pub fn to_inline(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| format!("{key}:{value}; "))
            .collect()
    }
}

/// Tags that carry default inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    P,
    Span,
    Table,
    Td,
    A,
}

/// Per-tag default styles, fixed at construction from the palette.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    div: StyleDictionary,
    p: StyleDictionary,
    span: StyleDictionary,
    table: StyleDictionary,
    td: StyleDictionary,
    a: StyleDictionary,
}

impl StyleResolver {
    pub fn new(palette: &Palette) -> Self {
        let all = StyleDictionary::from_pairs(&[
            ("font-family", "sans-serif"),
            ("font-size", "14px"),
            ("font-weight", "normal"),
            ("margin", "0"),
        ]);
        Self {
            div: all.clone(),
            p: all.merged(&StyleDictionary::from_pairs(&[("margin", "0 0 15px 0")])),
            span: all.clone(),
            table: StyleDictionary::from_pairs(&[
                ("width", "auto"),
                ("box-sizing", "border-box"),
                ("border-collapse", "collapse"),
                ("mso-table-lspace", "0pt"),
                ("mso-table-rspace", "0pt"),
            ]),
            td: all.merged(&StyleDictionary::from_pairs(&[
                ("vertical-align", "top"),
                ("padding", "5px"),
            ])),
            a: all.merged(&StyleDictionary::from_pairs(&[
                ("text-decoration", "underline"),
                ("color", palette.primary.as_str()),
            ])),
        }
    }

    pub fn defaults(&self, tag: Tag) -> &StyleDictionary {
        match tag {
            Tag::Div => &self.div,
            Tag::P => &self.p,
            Tag::Span => &self.span,
            Tag::Table => &self.table,
            Tag::Td => &self.td,
            Tag::A => &self.a,
        }
    }

    /// Inline style string for `tag` with `overrides` layered on its defaults.
    pub fn resolve(&self, tag: Tag, overrides: &StyleDictionary) -> String {
        self.defaults(tag).merged(overrides).to_inline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> StyleResolver {
        StyleResolver::new(&Palette::default())
    }

    #[test]
    fn test_p_override_appends_after_defaults() {
        let style = resolver().resolve(Tag::P, &StyleDictionary::from_pairs(&[("text-align", "center")]));
        assert_eq!(
            style,
            "font-family:sans-serif; font-size:14px; font-weight:normal; margin:0 0 15px 0; text-align:center; "
        );
    }

    #[test]
    fn test_override_keeps_base_position() {
        let overrides = StyleDictionary::from_pairs(&[
            ("text-align", "center"),
            ("font-size", "20px"),
            ("font-weight", "bold"),
        ]);
        let style = resolver().resolve(Tag::P, &overrides);
        assert_eq!(
            style,
            "font-family:sans-serif; font-size:20px; font-weight:bold; margin:0 0 15px 0; text-align:center; "
        );
    }

    #[test]
    fn test_merge_appends_new_keys_in_override_order() {
        let base = StyleDictionary::from_pairs(&[("a", "1"), ("b", "2")]);
        let over = StyleDictionary::from_pairs(&[("d", "4"), ("b", "x"), ("c", "3")]);
        let merged = base.merged(&over);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a", "b", "d", "c"]);
        assert_eq!(merged.get("b"), Some("x"));
    }

    #[test]
    fn test_anchor_uses_primary_color() {
        let palette = Palette {
            primary: "#123456".to_string(),
            ..Palette::default()
        };
        let style = StyleResolver::new(&palette).resolve(Tag::A, &StyleDictionary::new());
        assert!(style.ends_with("text-decoration:underline; color:#123456; "), "got: {style}");
    }

    #[test]
    fn test_table_has_no_text_properties() {
        let r = resolver();
        let table = r.defaults(Tag::Table);
        assert!(table.get("font-family").is_none());
        assert_eq!(table.get("border-collapse"), Some("collapse"));
    }

    #[test]
    fn test_td_defaults() {
        let style = resolver().resolve(Tag::Td, &StyleDictionary::new());
        assert_eq!(
            style,
            "font-family:sans-serif; font-size:14px; font-weight:normal; margin:0; vertical-align:top; padding:5px; "
        );
    }

    #[test]
    fn test_empty_dictionary_serializes_empty() {
        assert_eq!(StyleDictionary::new().to_inline(), "");
    }
}
