//! Configuration system for fuzzy-suction
//!
//! Settings for the command-line front end. The rule base itself is fixed
//! in code and is never read from configuration.
//!
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple config file locations
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./fuzzy-suction.toml` - Project-local configuration
//! 2. `~/.config/fuzzy-suction/config.toml` - User configuration (XDG)
//! 3. `~/.fuzzy-suction/config.toml` - User configuration (legacy)
//! 4. `/etc/fuzzy-suction/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `FUZZY_SUCTION_LOG_LEVEL` - Logging verbosity (quiet, normal, verbose, debug)
//! - `FUZZY_SUCTION_FORMAT` - Output format (text, json)
//! - `FUZZY_SUCTION_PRECISION` - Decimal places in printed values
//! - `FUZZY_SUCTION_STRICT_RANGE` - Reject inputs outside [0, 5] (true/false)
//! - `FUZZY_SUCTION_PLOT_WIDTH` - Chart width in characters
//!
//! # Example Configuration
//!
//! ```toml
//! [general]
//! log_level = "normal"
//! format = "text"
//! precision = 2
//!
//! [input]
//! strict_range = true
//!
//! [plot]
//! width = 60
//! height = 12
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::report::PlotOptions;

const ENV_PREFIX: &str = "FUZZY_SUCTION";
const MAX_PRECISION: usize = 10;

// ============================================================================
// Configuration Schema
// ============================================================================

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Input handling
    pub input: InputConfig,
    /// Terminal chart settings
    pub plot: PlotConfig,
}

/// General configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level
    pub log_level: LogLevel,
    /// Output format
    pub format: OutputFormat,
    /// Decimal places in printed values
    pub precision: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            format: OutputFormat::Text,
            precision: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Reject readings outside the nominal [0, 5] input range
    pub strict_range: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { strict_range: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let defaults = PlotOptions::default();
        Self {
            width: defaults.width,
            height: defaults.height,
        }
    }
}

impl PlotConfig {
    pub fn options(&self) -> PlotOptions {
        PlotOptions {
            width: self.width,
            height: self.height,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" | "0" => Some(LogLevel::Quiet),
            "normal" | "n" | "1" => Some(LogLevel::Normal),
            "verbose" | "v" | "2" => Some(LogLevel::Verbose),
            "debug" | "d" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// `tracing` filter directive for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "info",
            LogLevel::Debug => "debug",
        }
    }
}

// ============================================================================
// Configuration Loading
// ============================================================================

impl CliConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from default locations, then apply environment
    /// overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for path in Self::config_paths() {
            if path.exists() {
                config = Self::load_from_file(&path)?;
                break;
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Get the list of config file search paths
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        paths.push(PathBuf::from("./fuzzy-suction.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("fuzzy-suction").join("config.toml"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".fuzzy-suction").join("config.toml"));
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/fuzzy-suction/config.toml"));

        paths
    }

    /// Apply `FUZZY_SUCTION_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(format!("{}_{}", ENV_PREFIX, key)).ok());
    }

    /// Apply overrides from any key lookup (keys without the env prefix)
    ///
    /// Unparseable values are ignored and the previous setting kept.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("LOG_LEVEL").as_deref().and_then(LogLevel::from_str) {
            self.general.log_level = level;
        }

        if let Some(format) = lookup("FORMAT").as_deref().and_then(OutputFormat::from_str) {
            self.general.format = format;
        }

        if let Some(precision) = lookup("PRECISION").and_then(|v| v.parse::<usize>().ok()) {
            self.general.precision = precision;
        }

        if let Some(val) = lookup("STRICT_RANGE") {
            self.input.strict_range = val == "true" || val == "1" || val == "yes";
        }

        if let Some(width) = lookup("PLOT_WIDTH").and_then(|v| v.parse::<usize>().ok()) {
            self.plot.width = width;
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidValue {
                key: "general.precision",
                message: format!("{} exceeds the maximum of {}", self.general.precision, MAX_PRECISION),
            });
        }
        if self.plot.width < 10 {
            return Err(ConfigError::InvalidValue {
                key: "plot.width",
                message: format!("{} is below the minimum of 10", self.plot.width),
            });
        }
        if self.plot.height < 3 {
            return Err(ConfigError::InvalidValue {
                key: "plot.height",
                message: format!("{} is below the minimum of 3", self.plot.height),
            });
        }
        Ok(())
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Generate a default configuration file content
    pub fn default_config_content() -> &'static str {
        r#"# fuzzy-suction configuration file

[general]
# Logging level: quiet, normal, verbose, debug
log_level = "normal"
# Output format: text, json
format = "text"
# Decimal places in printed values (0-10)
precision = 2

[input]
# Reject surface/dirt readings outside [0, 5]
strict_range = true

[plot]
# Terminal chart size in characters (--plot)
width = 60
height = 12
"#
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CliConfig::new();
        assert_eq!(config.general.precision, 2);
        assert_eq!(config.general.format, OutputFormat::Text);
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert!(config.input.strict_range);
        assert_eq!(config.plot.options(), PlotOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [general]
            format = "json"
            log_level = "verbose"
            precision = 4

            [input]
            strict_range = false

            [plot]
            width = 80
        "#;

        let config = CliConfig::load_from_str(toml).unwrap();
        assert_eq!(config.general.format, OutputFormat::Json);
        assert_eq!(config.general.log_level, LogLevel::Verbose);
        assert_eq!(config.general.precision, 4);
        assert!(!config.input.strict_range);
        assert_eq!(config.plot.width, 80);
        assert_eq!(config.plot.height, 12);
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config = CliConfig::load_from_str(CliConfig::default_config_content()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = CliConfig::load_from_str("[general]\nprecision = 42\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "general.precision", .. }));

        let err = CliConfig::load_from_str("[plot]\nheight = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "plot.height", .. }));

        let err = CliConfig::load_from_str("[general]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LOG_LEVEL", "debug"),
            ("FORMAT", "json"),
            ("PRECISION", "3"),
            ("STRICT_RANGE", "no"),
            ("PLOT_WIDTH", "wide"),
        ]);

        let mut config = CliConfig::new();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.general.format, OutputFormat::Json);
        assert_eq!(config.general.precision, 3);
        assert!(!config.input.strict_range);
        // unparseable width keeps the default
        assert_eq!(config.plot.width, 60);
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("quiet"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::from_str("V"), Some(LogLevel::Verbose));
        assert_eq!(LogLevel::from_str("loud"), None);
        assert_eq!(LogLevel::Debug.filter_directive(), "debug");
        assert_eq!(LogLevel::Normal.filter_directive(), "warn");
    }

    #[test]
    fn test_enum_names_parse_back() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose, LogLevel::Debug] {
            assert_eq!(LogLevel::from_str(level.as_str()), Some(level));
        }
        for format in [OutputFormat::Text, OutputFormat::Json] {
            assert_eq!(OutputFormat::from_str(format.as_str()), Some(format));
        }
    }

    #[test]
    fn test_serialize_config() {
        let toml = CliConfig::new().to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[input]"));
        assert!(toml.contains("[plot]"));
    }

    #[test]
    fn test_config_paths() {
        let paths = CliConfig::config_paths();
        assert!(!paths.is_empty());
        assert!(paths[0].ends_with("fuzzy-suction.toml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CliConfig::load_from_file(Path::new("/nonexistent/fuzzy-suction.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
