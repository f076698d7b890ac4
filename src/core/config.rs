//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wayfinder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WayfinderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub animated: Option<bool>,
    pub transition_ms: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub id: Option<String>,
    pub scheme: Option<String>,
    pub bundle_id: Option<String>,
}

/// Flags from the command line. `None`/`false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub instant: bool,
    pub transition_ms: Option<u64>,
    pub log_level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TRANSITION_MS: u64 = 250;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub animated: bool,
    pub transition: Duration,
    pub log_level: LevelFilter,
    pub app_id: String,
    pub app_scheme: String,
    pub bundle_id: Option<String>,
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

/// Returns the path to `~/.wayfinder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wayfinder").join("config.toml"))
}

/// Load config from `~/.wayfinder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WayfinderConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WayfinderConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(WayfinderConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<WayfinderConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WayfinderConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WayfinderConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Wayfinder Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# animated = true                    # Default for open/pop in the explorer
# transition_ms = 250                # Or set WAYFINDER_TRANSITION_MS
# log_level = "debug"                # Or set WAYFINDER_LOG_LEVEL

# [app]
# id = "1234567890"                  # Or set WAYFINDER_APP_ID
# scheme = "wayfinder"               # Or set WAYFINDER_APP_SCHEME
# bundle_id = "com.example.wayfinder"
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
pub fn resolve(config: &WayfinderConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as `resolve`, reading environment variables through `env`.
pub fn resolve_with_env<F>(config: &WayfinderConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Animated: CLI --instant → config → default
    let animated = !cli.instant && config.general.animated.unwrap_or(true);

    // Transition: CLI → env → config → default
    let transition_ms = cli
        .transition_ms
        .or_else(|| env("WAYFINDER_TRANSITION_MS").and_then(|v| parse_or_warn(&v, "WAYFINDER_TRANSITION_MS")))
        .or(config.general.transition_ms)
        .unwrap_or(DEFAULT_TRANSITION_MS);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .as_deref()
        .and_then(|v| parse_or_warn::<LevelFilter>(v, "--log-level"))
        .or_else(|| env("WAYFINDER_LOG_LEVEL").and_then(|v| parse_or_warn(&v, "WAYFINDER_LOG_LEVEL")))
        .or_else(|| {
            config
                .general
                .log_level
                .as_deref()
                .and_then(|v| parse_or_warn(v, "general.log_level"))
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // App identity: env → config → empty
    let app_id = env("WAYFINDER_APP_ID")
        .or_else(|| config.app.id.clone())
        .unwrap_or_default();
    let app_scheme = env("WAYFINDER_APP_SCHEME")
        .or_else(|| config.app.scheme.clone())
        .unwrap_or_default();

    ResolvedConfig {
        animated,
        transition: Duration::from_millis(transition_ms),
        log_level,
        app_id,
        app_scheme,
        bundle_id: config.app.bundle_id.clone(),
    }
}

fn parse_or_warn<T: FromStr>(value: &str, what: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring invalid {}: {:?}", what, value);
            None
        }
    }
}
