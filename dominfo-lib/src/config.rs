//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and
//! `DOMINFO_*` environment variables. The lookup pipeline itself never reads
//! either; the CLI resolves them into a [`crate::LookupConfig`].

use crate::error::DominfoError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DefaultsConfig {
    /// Root referral server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_server: Option<String>,

    /// Socket timeout (as string, e.g., "5s", "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// WHOIS port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Default to JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,

    /// Indent JSON output (compact when false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

/// Configuration discovery and loading functionality.
#[derive(Debug, Default)]
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a specific file.
    ///
    /// # Returns
    ///
    /// The parsed configuration or an error if reading, parsing, or
    /// validation fails.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DominfoError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DominfoError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DominfoError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            DominfoError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is loaded first, then the home directory file, then a file
    /// in the current directory; later files override earlier ones field by
    /// field. Files that are missing are skipped; files that fail to parse
    /// are reported as errors.
    pub fn discover_and_load(&self) -> Result<FileConfig, DominfoError> {
        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        let mut merged_config = FileConfig::default();
        for path in candidates.into_iter().flatten() {
            let config = self.load_file(&path)?;
            debug!(path = %path.display(), "Loaded config file");
            merged_config = self.merge_configs(merged_config, config);
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./dominfo.toml", "./.dominfo.toml"];

        candidates
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    /// Get the global configuration file path in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let path = Path::new(&home).join(".dominfo.toml");
        path.exists().then_some(path)
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("dominfo").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations; values from `higher` win.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(lower_defaults), Some(higher_defaults)) => Some(DefaultsConfig {
                    root_server: higher_defaults.root_server.or(lower_defaults.root_server),
                    timeout: higher_defaults.timeout.or(lower_defaults.timeout),
                    port: higher_defaults.port.or(lower_defaults.port),
                    json: higher_defaults.json.or(lower_defaults.json),
                    pretty: higher_defaults.pretty.or(lower_defaults.pretty),
                }),
                (lower_defaults, higher_defaults) => higher_defaults.or(lower_defaults),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DominfoError> {
        let Some(defaults) = &config.defaults else {
            return Ok(());
        };

        if let Some(root_server) = &defaults.root_server {
            if root_server.trim().is_empty() || root_server.contains(char::is_whitespace) {
                return Err(DominfoError::config(format!(
                    "Invalid root_server '{}'",
                    root_server
                )));
            }
        }

        if let Some(timeout_str) = &defaults.timeout {
            if !matches!(parse_timeout_string(timeout_str), Some(secs) if secs > 0) {
                return Err(DominfoError::config(format!(
                    "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                    timeout_str
                )));
            }
        }

        if defaults.port == Some(0) {
            return Err(DominfoError::config("Port must be between 1 and 65535"));
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub root_server: Option<String>,
    pub timeout: Option<String>,
    pub port: Option<u16>,
    pub json: Option<bool>,
    pub config: Option<String>,
}

/// Load configuration from `DOMINFO_*` environment variables.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok())
}

fn load_env_config_from<F: Fn(&str) -> Option<String>>(var: F) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    if let Some(server) = var("DOMINFO_ROOT_SERVER") {
        let server = server.trim();
        if server.is_empty() || server.contains(char::is_whitespace) {
            warn!(value = %server, "Ignoring invalid DOMINFO_ROOT_SERVER");
        } else {
            env_config.root_server = Some(server.to_string());
        }
    }

    if let Some(timeout) = var("DOMINFO_TIMEOUT") {
        match parse_timeout_string(&timeout) {
            Some(secs) if secs > 0 => env_config.timeout = Some(timeout),
            _ => warn!(value = %timeout, "Ignoring invalid DOMINFO_TIMEOUT, use format like '5s'"),
        }
    }

    if let Some(port) = var("DOMINFO_PORT") {
        match port.trim().parse::<u16>() {
            Ok(p) if p > 0 => env_config.port = Some(p),
            _ => warn!(value = %port, "Ignoring invalid DOMINFO_PORT, must be 1-65535"),
        }
    }

    if let Some(val) = var("DOMINFO_JSON") {
        match parse_bool(&val) {
            Some(json) => env_config.json = Some(json),
            None => warn!(value = %val, "Ignoring invalid DOMINFO_JSON, use true/false"),
        }
    }

    if let Some(path) = var("DOMINFO_CONFIG") {
        if !path.trim().is_empty() {
            env_config.config = Some(path);
        }
    }

    env_config
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        timeout_str.parse::<u64>().ok()
    }
}
