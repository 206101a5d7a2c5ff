//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tally/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::LogLevel;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub keypad: KeypadConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub title: Option<String>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeypadConfig {
    pub show_help: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "Tally";
pub const DEFAULT_LOG_FILE: &str = "tally.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub title: String,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
    pub show_help: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&TallyConfig::default(), &CliOverrides::default())
    }
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub title: Option<String>,
    pub log_level: Option<LogLevel>,
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

/// Returns the path to `~/.tally/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tally").join("config.toml"))
}

/// Where a loaded config came from.
///
/// Loading happens before the file logger exists (the log file itself is a
/// config value), so the outcome is kept here and logged afterwards.
#[derive(Debug)]
pub enum ConfigOrigin {
    NoHomeDir,
    File(PathBuf),
    Generated {
        path: PathBuf,
        write_error: Option<std::io::Error>,
    },
}

impl ConfigOrigin {
    pub fn log(&self) {
        match self {
            ConfigOrigin::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
            ConfigOrigin::File(path) => info!("Loaded config from {}", path.display()),
            ConfigOrigin::Generated {
                path,
                write_error: None,
            } => info!("No config file found, generated default at {}", path.display()),
            ConfigOrigin::Generated {
                path,
                write_error: Some(e),
            } => warn!("Failed to write default config to {}: {}", path.display(), e),
        }
    }
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: TallyConfig,
    pub origin: ConfigOrigin,
}

/// Load config from `~/.tally/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TallyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(LoadedConfig {
            config: TallyConfig::default(),
            origin: ConfigOrigin::NoHomeDir,
        }),
    }
}

pub fn load_config_from(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        return Ok(LoadedConfig {
            config: TallyConfig::default(),
            origin: ConfigOrigin::Generated {
                path: path.to_path_buf(),
                write_error: generate_default_config(path).err(),
            },
        });
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TallyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok(LoadedConfig {
        config,
        origin: ConfigOrigin::File(path.to_path_buf()),
    })
}

const DEFAULT_CONFIG_FILE: &str = r#"# Tally Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# title = "Tally"                    # Or set TALLY_TITLE
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"
# log_file = "tally.log"             # Or set TALLY_LOG_FILE

# [keypad]
# show_help = true                   # Key hints under the keypad
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG_FILE)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TallyConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with the environment lookup supplied by the caller.
pub fn resolve_with(
    config: &TallyConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Title: CLI → env → config → default
    let title = cli
        .title
        .clone()
        .or_else(|| env("TALLY_TITLE"))
        .or_else(|| config.general.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .or_else(|| env("TALLY_LOG_LEVEL").and_then(|s| parse_log_level(&s)))
        .or(config.general.log_level)
        .unwrap_or_default();

    // Log file: env → config → default
    let log_file = env("TALLY_LOG_FILE")
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        title,
        log_level,
        log_file: PathBuf::from(log_file),
        show_help: config.keypad.show_help.unwrap_or(true),
    }
}

fn parse_log_level(value: &str) -> Option<LogLevel> {
    match LogLevel::from_str(value.trim(), true) {
        Ok(level) => Some(level),
        Err(e) => {
            warn!("Ignoring TALLY_LOG_LEVEL={:?}: {}", value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: TallyConfig = toml::from_str("").unwrap();
        assert!(config.general.title.is_none());
        assert!(config.keypad.show_help.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: TallyConfig = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(config.general.log_level.is_none());
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&TallyConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(
            resolved,
            ResolvedConfig {
                title: DEFAULT_TITLE.to_string(),
                log_level: LogLevel::default(),
                log_file: PathBuf::from(DEFAULT_LOG_FILE),
                show_help: true,
            }
        );
    }

    #[test]
    fn test_resolve_env_beats_file() {
        let config = TallyConfig {
            general: GeneralConfig {
                title: Some("From file".to_string()),
                log_level: Some(LogLevel::Warn),
                log_file: Some("file.log".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "TALLY_TITLE" => Some("From env".to_string()),
            "TALLY_LOG_LEVEL" => Some("DEBUG".to_string()),
            "TALLY_LOG_FILE" => Some("env.log".to_string()),
            _ => None,
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.title, "From env");
        assert_eq!(resolved.log_level, LogLevel::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("env.log"));
    }

    #[test]
    fn test_resolve_bad_env_level_falls_back_to_file() {
        let config = TallyConfig {
            general: GeneralConfig {
                log_level: Some(LogLevel::Error),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "TALLY_LOG_LEVEL").then(|| "loud".to_string());
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.log_level, LogLevel::Error);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = TallyConfig {
            general: GeneralConfig {
                title: Some("From file".to_string()),
                log_level: Some(LogLevel::Warn),
                log_file: None,
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            title: Some("From CLI".to_string()),
            log_level: Some(LogLevel::Trace),
        };
        let env = |key: &str| match key {
            "TALLY_TITLE" => Some("From env".to_string()),
            "TALLY_LOG_LEVEL" => Some("error".to_string()),
            _ => None,
        };
        let resolved = resolve_with(&config, &cli, env);
        assert_eq!(resolved.title, "From CLI");
        assert_eq!(resolved.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
title = "Desk calc"
log_level = "debug"
log_file = "/tmp/tally-test.log"

[keypad]
show_help = false
"#;
        let config: TallyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.title.as_deref(), Some("Desk calc"));
        assert_eq!(config.general.log_level, Some(LogLevel::Debug));
        assert_eq!(
            config.general.log_file.as_deref(),
            Some("/tmp/tally-test.log")
        );
        assert_eq!(config.keypad.show_help, Some(false));

        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert!(!resolved.show_help);
    }

    #[test]
    fn test_bad_log_level_is_parse_error() {
        let result: Result<TallyConfig, _> = toml::from_str("[general]\nlog_level = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_log_level_ignores_case() {
        assert_eq!(parse_log_level("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level(" warn "), Some(LogLevel::Warn));
        assert_eq!(parse_log_level("chatty"), None);
    }

    #[test]
    fn test_load_config_from_missing_writes_default() {
        let dir = std::env::temp_dir().join(format!("tally-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.config.general.title.is_none());
        assert!(matches!(
            loaded.origin,
            ConfigOrigin::Generated {
                write_error: None,
                ..
            }
        ));
        assert!(path.exists());

        // Second load parses the generated file
        let loaded = load_config_from(&path).unwrap();
        assert!(matches!(loaded.origin, ConfigOrigin::File(ref p) if p == &path));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_from_malformed() {
        let dir = std::env::temp_dir().join(format!("tally-bad-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\ntitle = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_from_unwritable_reports_write_error() {
        let dir = std::env::temp_dir().join(format!("tally-blocked-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        // A plain file where the config directory should be
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.config.general.title.is_none());
        assert!(matches!(
            loaded.origin,
            ConfigOrigin::Generated {
                write_error: Some(_),
                ..
            }
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
