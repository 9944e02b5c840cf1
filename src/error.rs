#[derive(Debug, thiserror::Error)]
pub enum MailweaveError {
    #[error("invalid section '{name}' (expected preheader, body or footer)")]
    InvalidSection { name: String },

    #[error("{field}[{index}] is out of range (length {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported config format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("JSON config error in {path}: {source}")]
    ConfigJson {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("YAML config error in {path}: {source}")]
    ConfigYaml {
        path: std::path::PathBuf,
        source: serde_yaml::Error,
    },

    #[error("TOML config error in {path}: {source}")]
    ConfigToml {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },

    #[error("Handlebars template error: {reason}")]
    TemplateRegister { reason: String },

    #[error("Handlebars render error: {reason}")]
    TemplateRender { reason: String },

    #[error("required field '{field}' is not set")]
    MissingField { field: &'static str },

    #[error("invalid {field} address '{value}': {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to build message: {reason}")]
    MessageBuild { reason: String },

    #[error("SMTP connection error: {reason}")]
    SmtpConnect { reason: String },

    #[error("SMTP send error: {reason}")]
    SmtpSend { reason: String },
}
