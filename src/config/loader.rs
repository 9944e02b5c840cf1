use std::path::{Path, PathBuf};

use crate::config::types::Config;
use crate::MailweaveError;

type Parser = fn(&str, &Path) -> crate::Result<Config>;

/// Load a [`Config`] from a JSON, YAML or TOML file, chosen by extension.
///
/// The extension is checked before the file is read.
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let parse = parser_for(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| MailweaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parser for the file's extension, compared case-insensitively.
fn parser_for(path: &Path) -> crate::Result<Parser> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => Ok(parse_json),
        "yml" | "yaml" => Ok(parse_yaml),
        "toml" => Ok(parse_toml),
        _ => Err(MailweaveError::UnsupportedFormat { extension: ext }),
    }
}

impl Config {
    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        parse_json(content, &string_path())
    }

    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        parse_yaml(content, &string_path())
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        parse_toml(content, &string_path())
    }
}

fn string_path() -> PathBuf {
    PathBuf::from("<string>")
}

fn parse_json(content: &str, path: &Path) -> crate::Result<Config> {
    serde_json::from_str(content).map_err(|source| MailweaveError::ConfigJson {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_yaml(content: &str, path: &Path) -> crate::Result<Config> {
    // An empty YAML document means "all defaults".
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|source| MailweaveError::ConfigYaml {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml(content: &str, path: &Path) -> crate::Result<Config> {
    toml::from_str(content).map_err(|source| MailweaveError::ConfigToml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::config::{GlueMode, MailType, Palette};

    #[test]
    fn test_yaml_partial_colors_merge_over_defaults() {
        let c = Config::from_yaml_str("colors:\n  primary: '#ff0000'\n").unwrap();
        assert_eq!(c.colors.primary, "#ff0000");
        assert_eq!(c.colors.body_bg, Palette::default().body_bg);
        assert_eq!(c.colors.footer_color, "#999999");
        assert_eq!(c.border_radius, "0px");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let c = Config::from_yaml_str("").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn test_json_camel_case_aliases() {
        let c = Config::from_json_str(
            r#"{"borderRadius": "4px", "siteUrl": "https://example.com/", "mail": {"mailType": "text", "wrapChars": 60}}"#,
        )
        .unwrap();
        assert_eq!(c.border_radius, "4px");
        assert_eq!(c.site_url, "https://example.com/");
        assert_eq!(c.mail.mail_type, MailType::Text);
        assert_eq!(c.mail.wrap_chars, 60);
        assert_eq!(c.mail.newline, "\n");
    }

    #[test]
    fn test_toml_extra_mail_keys_pass_through() {
        let c = Config::from_toml_str(
            "glue_mode = \"legacy\"\n[mail]\nprotocol = \"smtp\"\npriority = 3\n",
        )
        .unwrap();
        assert_eq!(c.glue_mode, GlueMode::Legacy);
        assert_eq!(c.mail.extra["protocol"], "smtp");
        assert_eq!(c.mail.extra["priority"], 3);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(file, "border_radius: 6px\nplain_section_glue: \"\\n--\\n\"\n").unwrap();
        let c = load_config(file.path()).unwrap();
        assert_eq!(c.border_radius, "6px");
        assert_eq!(c.plain_section_glue, "\n--\n");
    }

    #[test]
    fn test_load_config_uppercase_extension() {
        let mut file = tempfile::Builder::new().suffix(".TOML").tempfile().unwrap();
        write!(file, "site_url = \"https://example.org/\"\n").unwrap();
        let c = load_config(file.path()).unwrap();
        assert_eq!(c.site_url, "https://example.org/");
    }

    #[test]
    fn test_load_config_unsupported_extension_before_read() {
        let result = load_config(Path::new("/nonexistent/brand.ini"));
        assert!(
            matches!(result, Err(MailweaveError::UnsupportedFormat { ref extension }) if extension == "ini"),
            "unexpected result: {result:?}"
        );
        let result = load_config(Path::new("/nonexistent/mailweaverc"));
        assert!(matches!(
            result,
            Err(MailweaveError::UnsupportedFormat { ref extension }) if extension.is_empty()
        ));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/mailweave.toml"));
        assert!(matches!(result, Err(MailweaveError::Io { .. })));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let err = Config::from_json_str("{not json").unwrap_err();
        assert!(
            matches!(err, MailweaveError::ConfigJson { ref path, .. } if path == Path::new("<string>")),
            "unexpected error: {err}"
        );
    }
}
