//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.picsearch/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::session::DEFAULT_PER_PAGE;
use crate::search::providers::unsplash::DEFAULT_UNSPLASH_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PicsearchConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub unsplash: UnsplashConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub per_page: Option<u32>,
    pub pages: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UnsplashConfig {
    pub access_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAGES: u32 = 1;
pub const MAX_PER_PAGE: u32 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub per_page: u32,
    pub pages: u32,
    pub unsplash_access_key: Option<String>,
    pub unsplash_base_url: String,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub per_page: Option<u32>,
    pub pages: Option<u32>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.picsearch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".picsearch").join("config.toml"))
}

/// Load config from `~/.picsearch/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PicsearchConfig::default()`.
pub fn load_config() -> Result<PicsearchConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(PicsearchConfig::default())
        }
    }
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<PicsearchConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PicsearchConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PicsearchConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

fn redacted(config: &PicsearchConfig) -> String {
    format!(
        "general={:?}, unsplash.base_url={:?}, unsplash.access_key={}",
        config.general,
        config.unsplash.base_url,
        if config.unsplash.access_key.is_some() { "<set>" } else { "<unset>" }
    )
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# picsearch configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# per_page = 20                      # results per page, 1..=30
# pages = 1                          # pages to load per run

# [unsplash]
# access_key = "..."                 # Or set UNSPLASH_ACCESS_KEY env var
# base_url = "https://api.unsplash.com"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PicsearchConfig, cli: CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env<F>(config: &PicsearchConfig, cli: CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Per page: CLI → env → config → default, clamped to what Unsplash accepts
    let per_page = cli
        .per_page
        .or_else(|| env("PICSEARCH_PER_PAGE").and_then(|v| v.parse().ok()))
        .or(config.general.per_page)
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let pages = cli
        .pages
        .or(config.general.pages)
        .unwrap_or(DEFAULT_PAGES)
        .max(1);

    // Access key: env → config
    let unsplash_access_key = env("UNSPLASH_ACCESS_KEY")
        .or_else(|| config.unsplash.access_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Base URL: env → config → default
    let unsplash_base_url = env("UNSPLASH_BASE_URL")
        .or_else(|| config.unsplash.base_url.clone())
        .unwrap_or_else(|| DEFAULT_UNSPLASH_BASE_URL.to_string());

    ResolvedConfig {
        per_page,
        pages,
        unsplash_access_key,
        unsplash_base_url,
    }
}
