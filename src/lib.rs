pub mod builder;
pub mod button;
pub mod config;
pub mod error;
pub mod markup;
pub mod render;
pub mod section;
pub mod style;
pub mod transport;

pub use builder::{
    ButtonGroupOptions, ButtonOptions, CompiledEmail, ContentBuilder, LinkOptions,
};
pub use config::{load_config, Config, GlueMode, MailSettings, MailType, Palette};
pub use error::MailweaveError;
pub use section::Section;
pub type Result<T> = std::result::Result<T, MailweaveError>;
