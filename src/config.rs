use reqwest::Url;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_PROXY_BASE: &str = "https://api.rss2json.com/v1/api.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid proxy base '{0}'")]
    InvalidProxyBase(String),
    #[error("column '{0}' has a page size of 0")]
    EmptyPageSize(String),
    #[error("no columns configured")]
    NoColumns,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the feed-to-JSON conversion service
    #[serde(default = "default_proxy_base")]
    pub proxy_base: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_bind")]
    pub bind: String,
    pub columns: Vec<ColumnConfig>,
}

fn default_proxy_base() -> String {
    DEFAULT_PROXY_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

/// One feed source and how its column displays it.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColumnConfig {
    pub name: String,
    pub url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_show_image")]
    pub show_image: bool,
}

fn default_page_size() -> usize {
    6
}

fn default_show_image() -> bool {
    true
}

impl ColumnConfig {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            page_size: default_page_size(),
            show_image: default_show_image(),
        }
    }

    pub fn without_image(mut self) -> Self {
        self.show_image = false;
        self
    }
}

impl Default for Config {
    /// The built-in registry: tech on the left, general news with images in
    /// the middle, business on the right.
    fn default() -> Self {
        Self {
            proxy_base: default_proxy_base(),
            timeout_secs: default_timeout_secs(),
            bind: default_bind(),
            columns: vec![
                ColumnConfig::new("TechCrunch", "https://techcrunch.com/feed/").without_image(),
                ColumnConfig::new("BBC News", "https://feeds.bbci.co.uk/news/rss.xml"),
                ColumnConfig::new("CNN Business", "http://rss.cnn.com/rss/edition_business.rss")
                    .without_image(),
            ],
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it exists, the built-in registry otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.proxy_base)
            .map_err(|_| ConfigError::InvalidProxyBase(self.proxy_base.clone()))?;

        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }

        if let Some(column) = self.columns.iter().find(|c| c.page_size == 0) {
            return Err(ConfigError::EmptyPageSize(column.name.clone()));
        }

        Ok(())
    }
}
