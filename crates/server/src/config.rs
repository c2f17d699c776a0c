//! # Application Configuration
//!
//! This module defines the configuration structure for the `schemascope-server`
//! and the logic for loading it from an optional `config.yml` file and
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use schemascope::{TypeRuleConfig, TypeRules};
use schemascope_text::DEFAULT_EXCERPT_CHARS;
use schemascope_web::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// The environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate or an invalid value.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    /// Replaces the built-in type inference table when present.
    #[serde(default)]
    pub type_rules: Option<Vec<TypeRuleConfig>>,
}

fn default_port() -> u16 {
    3015
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            fetch: FetchConfig::default(),
            sitemap: SitemapConfig::default(),
            extract: ExtractConfig::default(),
            type_rules: None,
        }
    }
}

impl AppConfig {
    /// Compiles the configured type rules, or the built-in table.
    pub fn compile_type_rules(&self) -> Result<TypeRules, ConfigError> {
        match &self.type_rules {
            Some(rules) => TypeRules::new(rules)
                .map_err(|e| ConfigError::General(format!("Invalid type rule pattern: {e}"))),
            None => Ok(TypeRules::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::General(
                "fetch.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.sitemap.url_limit == 0 {
            return Err(ConfigError::General(
                "sitemap.url_limit must be greater than 0".to_string(),
            ));
        }
        if self.extract.excerpt_chars == 0 {
            return Err(ConfigError::General(
                "extract.excerpt_chars must be greater than 0".to_string(),
            ));
        }
        self.compile_type_rules().map(|_| ())
    }
}

/// Outbound page fetching.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SitemapConfig {
    /// The most URLs `/sitemap` returns.
    #[serde(default = "default_url_limit")]
    pub url_limit: usize,
    /// The most child sitemaps fetched when following a sitemap index.
    #[serde(default = "default_max_child_sitemaps")]
    pub max_child_sitemaps: usize,
}

fn default_url_limit() -> usize {
    100
}

fn default_max_child_sitemaps() -> usize {
    50
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            url_limit: default_url_limit(),
            max_child_sitemaps: default_max_child_sitemaps(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

fn default_excerpt_chars() -> usize {
    DEFAULT_EXCERPT_CHARS
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// The file is taken from `config_path_override`, then from `CONFIG_PATH`,
/// then from `config.yml` next to this crate's manifest. An explicitly named
/// file must exist; the fallback file is optional.
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `SCHEMASCOPE_...` variables (e.g.
///   `SCHEMASCOPE_FETCH__TIMEOUT_SECS`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    let explicit_path = config_path_override
        .map(str::to_string)
        .or_else(|| env::var(CONFIG_PATH_VAR).ok().filter(|p| !p.is_empty()));

    match explicit_path {
        Some(path) => {
            let content = read_and_substitute(&path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            if let Some(content) = read_and_substitute(&user_config_path)? {
                info!("Loading user-defined configuration from '{user_config_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("'{user_config_path}' not found. Using built-in defaults.");
            }
        }
    }

    let settings = builder
        // Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Prefixed environment variables for nested keys.
        .add_source(
            Environment::with_prefix("SCHEMASCOPE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
