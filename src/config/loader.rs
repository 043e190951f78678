//! Configuration file loading with precedence handling.

use crate::api::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::model::{clamp_per_page, DEFAULT_PER_PAGE};
use crate::state::cache::DEFAULT_STALE_TIME;
use crate::state::debounce::DEFAULT_DEBOUNCE;
use crate::state::visibility::{DEFAULT_MARGIN_ROWS, DEFAULT_THRESHOLD};
use crate::state::{ErrorDisplay, SearchSettings};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "GHSEARCH_CONFIG";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "GHSEARCH_API_URL";

/// Environment variable holding a GitHub personal access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/ghsearch/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// GitHub API base URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Results per page (1-100).
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Debounce delay in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// How long cached result sets stay fresh, in seconds.
    #[serde(default)]
    pub stale_time_secs: Option<u64>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Rows below the viewport that count as visible for the sentinel.
    #[serde(default)]
    pub sentinel_margin_rows: Option<u16>,

    /// Minimum visible fraction of the sentinel (0.0-1.0).
    #[serde(default)]
    pub sentinel_threshold: Option<f32>,

    /// `replace` or `overlay`.
    #[serde(default)]
    pub error_display: Option<ErrorDisplay>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// GitHub personal access token.
    #[serde(default)]
    pub token: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// GitHub API base URL.
    pub api_url: String,
    /// Results per page, already clamped to 1-100.
    pub per_page: u32,
    /// Debounce delay.
    pub debounce: Duration,
    /// Cache staleness window.
    pub stale_time: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Sentinel root margin in rows.
    pub sentinel_margin_rows: u16,
    /// Sentinel visibility threshold.
    pub sentinel_threshold: f32,
    /// Error presentation policy.
    pub error_display: ErrorDisplay,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// GitHub personal access token.
    pub token: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            debounce: DEFAULT_DEBOUNCE,
            stale_time: DEFAULT_STALE_TIME,
            request_timeout: DEFAULT_TIMEOUT,
            sentinel_margin_rows: DEFAULT_MARGIN_ROWS,
            sentinel_threshold: DEFAULT_THRESHOLD,
            error_display: ErrorDisplay::default(),
            log_file_path: default_log_path(),
            token: None,
        }
    }
}

impl ResolvedConfig {
    /// State-machine tunables.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            per_page: self.per_page,
            debounce: self.debounce,
            stale_time: self.stale_time,
            margin_rows: self.sentinel_margin_rows,
            threshold: self.sentinel_threshold,
            error_display: self.error_display,
        }
    }

    /// HTTP client settings.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            token: self.token.clone(),
            timeout: self.request_timeout,
        }
    }
}

/// Overrides taken from command-line flags. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--per-page`
    pub per_page: Option<u32>,
    /// `--debounce-ms`
    pub debounce_ms: Option<u64>,
    /// `--error-display`
    pub error_display: Option<ErrorDisplay>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/ghsearch/ghsearch.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("ghsearch").join("ghsearch.log")
    } else {
        PathBuf::from("ghsearch.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/ghsearch/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghsearch").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GHSEARCH_CONFIG` environment variable
/// 3. Default path `~/.config/ghsearch/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is set but empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GHSEARCH_API_URL`: Override API base URL
/// - `GITHUB_TOKEN`: Override access token
///
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(api_url) = non_empty_env(API_URL_ENV) {
        config.api_url = api_url;
    }

    if let Some(token) = non_empty_env(TOKEN_ENV) {
        config.token = Some(token);
    }

    config
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Out-of-range values are clamped.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_url: config.api_url.unwrap_or(defaults.api_url),
        per_page: config
            .per_page
            .map(clamp_per_page)
            .unwrap_or(defaults.per_page),
        debounce: config
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce),
        stale_time: config
            .stale_time_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.stale_time),
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        sentinel_margin_rows: config
            .sentinel_margin_rows
            .unwrap_or(defaults.sentinel_margin_rows),
        sentinel_threshold: config
            .sentinel_threshold
            .map(clamp_threshold)
            .unwrap_or(defaults.sentinel_threshold),
        error_display: config.error_display.unwrap_or(defaults.error_display),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        token: config.token.or(defaults.token),
    }
}

fn clamp_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        DEFAULT_THRESHOLD
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(api_url) = overrides.api_url {
        config.api_url = api_url;
    }

    if let Some(per_page) = overrides.per_page {
        config.per_page = clamp_per_page(per_page);
    }

    if let Some(debounce_ms) = overrides.debounce_ms {
        config.debounce = Duration::from_millis(debounce_ms);
    }

    if let Some(error_display) = overrides.error_display {
        config.error_display = error_display;
    }

    config
}

/// Run the whole precedence chain.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file));
    Ok(apply_cli_overrides(config, overrides))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
