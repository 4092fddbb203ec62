//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.reel/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::transcript::DEFAULT_GREETING;
use crate::query::backends::http::{DEFAULT_BASE_URL, DEFAULT_QUERY_PATH};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub greeting: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
    pub path: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub greeting: String,
    pub base_url: String,
    pub query_path: String,
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

/// Returns the path to `~/.reel/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".reel").join("config.toml"))
}

/// Load config from `~/.reel/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ReelConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ReelConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ReelConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ReelConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ReelConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ReelConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# reel Configuration
# All settings are optional - defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# greeting = "Welcome! Ask me about movies, actors, or relationships in our database."

# [endpoint]
# base_url = "http://localhost:5000"   # Or set REEL_ENDPOINT_URL / --endpoint
# path = "/api/query"                  # Or set REEL_QUERY_PATH
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_endpoint` is the `--endpoint` flag (None = not specified).
pub fn resolve(config: &ReelConfig, cli_endpoint: Option<&str>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_endpoint
        .map(|s| s.to_string())
        .or_else(|| std::env::var("REEL_ENDPOINT_URL").ok())
        .or_else(|| config.endpoint.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Query path: env → config → default
    let query_path = std::env::var("REEL_QUERY_PATH")
        .ok()
        .or_else(|| config.endpoint.path.clone())
        .unwrap_or_else(|| DEFAULT_QUERY_PATH.to_string());

    let greeting = config
        .general
        .greeting
        .clone()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    ResolvedConfig {
        greeting,
        base_url,
        query_path,
    }
}
