//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.globetrotter/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::continent::CONTINENTS;
use crate::core::filter::FilterState;
use crate::source::providers::restcountries::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GlobetrotterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub restcountries: RestCountriesConfig,
    #[serde(default)]
    pub file: FileConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_source: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RestCountriesConfig {
    pub base_url: Option<String>,
    pub fields: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FiltersConfig {
    pub continents: Option<Vec<String>>,
    pub show_sovereign: Option<bool>,
    pub show_non_sovereign: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SOURCE: &str = "restcountries";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_RETRIES: u32 = 0;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// CLI Overrides
// ============================================================================

/// Values given on the command line. `None`/empty = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub source: Option<String>,
    pub file: Option<PathBuf>,
    pub continents: Vec<String>,
    pub hide_sovereign: bool,
    pub hide_dependent: bool,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: String,
    pub base_url: String,
    pub fields: Vec<String>,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub file_path: Option<PathBuf>,
    pub initial_filter: FilterState,
    pub log_level: LevelFilter,
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

/// Returns the path to `~/.globetrotter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".globetrotter").join("config.toml"))
}

/// Load config from `~/.globetrotter/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GlobetrotterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GlobetrotterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GlobetrotterConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GlobetrotterConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<GlobetrotterConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GlobetrotterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Globetrotter Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_source = "restcountries"   # "restcountries" or "file"
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"

# [restcountries]
# base_url = "https://restcountries.com/v3.1"   # Or set RESTCOUNTRIES_BASE_URL env var
# fields = ["name", "cca2", "flags", "population", "continents", "capital", "independent"]
# timeout_secs = 15
# retries = 0                        # Extra attempts after a network or 5xx failure
# retry_delay_ms = 500

# [file]
# path = "countries.json"            # Or set GLOBETROTTER_FILE env var

# [filters]
# continents = ["Europe"]            # Initially selected continents (empty = all)
# show_sovereign = true
# show_non_sovereign = true
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GlobetrotterConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Source: CLI → env → config → default. A CLI --file implies the file source.
    let source = cli
        .source
        .clone()
        .or_else(|| cli.file.as_ref().map(|_| "file".to_string()))
        .or_else(|| std::env::var("GLOBETROTTER_SOURCE").ok())
        .or_else(|| config.general.default_source.clone())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    // Base URL: env → config → default
    let base_url = std::env::var("RESTCOUNTRIES_BASE_URL")
        .ok()
        .or_else(|| config.restcountries.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // File path: CLI → env → config
    let file_path = cli
        .file
        .clone()
        .or_else(|| std::env::var("GLOBETROTTER_FILE").ok().map(PathBuf::from))
        .or_else(|| config.file.path.clone());

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|level| match level.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        source,
        base_url,
        fields: config.restcountries.fields.clone().unwrap_or_default(),
        timeout: Duration::from_secs(
            config
                .restcountries
                .timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        retries: config.restcountries.retries.unwrap_or(DEFAULT_RETRIES),
        retry_delay: Duration::from_millis(
            config
                .restcountries
                .retry_delay_ms
                .unwrap_or(DEFAULT_RETRY_DELAY_MS),
        ),
        file_path,
        initial_filter: resolve_filter(&config.filters, cli),
        log_level,
    }
}

/// Initial filter state: CLI continents replace configured ones; CLI hide flags win.
fn resolve_filter(filters: &FiltersConfig, cli: &CliOverrides) -> FilterState {
    let mut state = FilterState::default();

    let continents = if cli.continents.is_empty() {
        filters.continents.clone().unwrap_or_default()
    } else {
        cli.continents.clone()
    };
    for continent in continents {
        match CONTINENTS.iter().find(|c| c.eq_ignore_ascii_case(&continent)) {
            Some(known) => {
                state.selected_continents.insert(known.to_string());
            }
            None => warn!("Ignoring unknown continent filter '{}'", continent),
        }
    }

    state.show_sovereign = !cli.hide_sovereign && filters.show_sovereign.unwrap_or(true);
    state.show_non_sovereign = !cli.hide_dependent && filters.show_non_sovereign.unwrap_or(true);
    state
}
