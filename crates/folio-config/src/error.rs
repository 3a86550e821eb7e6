use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(folio_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(folio_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(folio_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Invalid GitHub username: {0:?}")]
    #[diagnostic(
        code(folio_config::invalid_username),
        help("GitHub usernames contain only alphanumeric characters or single hyphens")
    )]
    InvalidUsername(String),

    #[error("Invalid request timeout: {0}")]
    #[diagnostic(
        code(folio_config::invalid_timeout),
        help("Use a duration such as `30s`, `1m` or `1m30s`")
    )]
    InvalidTimeout(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(folio_config::io))]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(folio_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(folio_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
