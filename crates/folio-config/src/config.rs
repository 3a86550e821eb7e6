use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, RwLock},
    time::Duration,
};

use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;
use tracing::{debug, info};

use crate::{
    about::About,
    annotations::annotate_toml_table,
    defaults::{self, strings},
    error::{ConfigError, Result},
    utils::{parse_duration, xdg_config_home},
};

/// Portfolio configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Display name shown in the navigation bar, hero and footer.
    pub name: Option<String>,

    /// One-line tagline shown under the name.
    pub tagline: Option<String>,

    /// GitHub account whose public repositories are listed.
    pub github_username: Option<String>,

    /// LinkedIn profile URL. Leave empty to hide the LinkedIn links.
    pub linkedin_url: Option<String>,

    /// Contact email address. Leave empty to hide the email links.
    pub email: Option<String>,

    /// Link to a résumé document. Leave empty to hide the Resume button.
    pub resume_url: Option<String>,

    /// Portrait image path or URL used in the hero. Leave empty to hide it.
    pub avatar: Option<String>,

    /// Repository names pinned to the featured grid, in display order.
    /// Names must match GitHub repository names exactly.
    pub featured: Option<Vec<String>>,

    /// Base URL of the GitHub REST API.
    /// Default: https://api.github.com
    pub api_base: Option<String>,

    /// Timeout for the repository request, e.g. `30s` or `1m`.
    /// Default: 30s
    pub request_timeout: Option<String>,

    /// Content of the About section.
    pub about: Option<About>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> =
    LazyLock::new(|| RwLock::new(default_config_path()));

/// `$FOLIO_CONFIG` if set, otherwise `folio/config.toml` under the XDG config
/// directory.
pub fn default_config_path() -> PathBuf {
    match std::env::var("FOLIO_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("folio").join("config.toml"),
    }
}

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap();
    *global_config = Some(config);
    Ok(())
}

pub fn get_config() -> Config {
    let mut config_guard = CONFIG.write().unwrap();
    config_guard
        .get_or_insert_with(Config::default_config)
        .clone()
}

impl Config {
    /// The built-in profile with every field populated.
    pub fn default_config() -> Self {
        Self {
            name: Some(defaults::NAME.to_string()),
            tagline: Some(defaults::TAGLINE.to_string()),
            github_username: Some(defaults::GITHUB_USERNAME.to_string()),
            linkedin_url: Some(defaults::LINKEDIN_URL.to_string()),
            email: Some(defaults::EMAIL.to_string()),
            resume_url: Some(defaults::RESUME_URL.to_string()),
            avatar: Some(defaults::AVATAR.to_string()),
            featured: Some(strings(defaults::FEATURED)),
            api_base: Some(defaults::API_BASE.to_string()),
            request_timeout: Some(defaults::REQUEST_TIMEOUT.to_string()),
            about: Some(About::default_about()),
        }
    }

    /// Loads the configuration from the configuration file.
    /// If the file does not exist, the built-in profile is used.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH.read().unwrap().to_path_buf();

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => {
                debug!("loading configuration from {}", config_path.display());
                toml::from_str(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "no configuration at {}, using built-in profile",
                    config_path.display()
                );
                Self::default_config()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    /// Fills every unset field from the built-in profile and validates the
    /// result.
    pub fn resolve(&mut self) -> Result<()> {
        self.name.get_or_insert_with(|| defaults::NAME.to_string());
        self.tagline
            .get_or_insert_with(|| defaults::TAGLINE.to_string());
        self.github_username
            .get_or_insert_with(|| defaults::GITHUB_USERNAME.to_string());
        self.linkedin_url
            .get_or_insert_with(|| defaults::LINKEDIN_URL.to_string());
        self.email.get_or_insert_with(|| defaults::EMAIL.to_string());
        self.resume_url
            .get_or_insert_with(|| defaults::RESUME_URL.to_string());
        self.avatar
            .get_or_insert_with(|| defaults::AVATAR.to_string());
        self.featured
            .get_or_insert_with(|| strings(defaults::FEATURED));
        self.api_base
            .get_or_insert_with(|| defaults::API_BASE.to_string());
        self.request_timeout
            .get_or_insert_with(|| defaults::REQUEST_TIMEOUT.to_string());
        self.about
            .get_or_insert_with(About::default_about)
            .resolve();

        let username = self.github_username();
        if !is_valid_username(username) {
            return Err(ConfigError::InvalidUsername(username.to_string()));
        }

        self.request_timeout()?;

        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(defaults::NAME)
    }

    pub fn tagline(&self) -> &str {
        self.tagline.as_deref().unwrap_or(defaults::TAGLINE)
    }

    pub fn github_username(&self) -> &str {
        self.github_username
            .as_deref()
            .unwrap_or(defaults::GITHUB_USERNAME)
    }

    pub fn linkedin_url(&self) -> Option<&str> {
        non_empty(self.linkedin_url.as_deref(), defaults::LINKEDIN_URL)
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref(), defaults::EMAIL)
    }

    pub fn resume_url(&self) -> Option<&str> {
        non_empty(self.resume_url.as_deref(), defaults::RESUME_URL)
    }

    pub fn avatar(&self) -> Option<&str> {
        non_empty(self.avatar.as_deref(), defaults::AVATAR)
    }

    pub fn featured(&self) -> Vec<String> {
        self.featured
            .clone()
            .unwrap_or_else(|| strings(defaults::FEATURED))
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(defaults::API_BASE)
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        let raw = self
            .request_timeout
            .as_deref()
            .unwrap_or(defaults::REQUEST_TIMEOUT);
        parse_duration(raw).ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
    }

    pub fn about(&self) -> About {
        let mut about = self.about.clone().unwrap_or_else(About::default_about);
        about.resolve();
        about
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        use toml_edit::Item;

        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        if let Some(Item::Table(about_table)) = doc.get_mut("about") {
            annotate_toml_table::<About>(about_table, false)?;
        }

        Ok(doc)
    }
}

/// A configured empty string hides the item; an unset field falls back to
/// the built-in value.
fn non_empty<'a>(value: Option<&'a str>, default: &'a str) -> Option<&'a str> {
    Some(value.unwrap_or(default).trim()).filter(|s| !s.is_empty())
}

fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

pub fn generate_default_config() -> Result<PathBuf> {
    let config_path = CONFIG_PATH.read().unwrap().to_path_buf();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, annotated_doc.to_string())?;
    info!(
        "Default configuration file generated with documentation at: {}",
        config_path.display()
    );
    Ok(config_path)
}
