pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_PRECISION: usize = 12;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Log every clipboard change and detection
    #[serde(default)]
    pub debug: bool,

    // Which top-level converters take part in the chain
    #[serde(default)]
    pub converters: ConvertersConfig,

    // Which unit families the simple unit registry knows about
    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub timestamp: TimestampConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertersConfig {
    #[serde(default = "enabled")]
    pub timestamp: bool,
    #[serde(default = "enabled")]
    pub simple_unit: bool,
}

impl Default for ConvertersConfig {
    fn default() -> Self {
        Self {
            timestamp: true,
            simple_unit: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnitsConfig {
    #[serde(default = "enabled")]
    pub temperature: bool,
    #[serde(default = "enabled")]
    pub length: bool,
    #[serde(default = "enabled")]
    pub speed: bool,
    #[serde(default = "enabled")]
    pub mass: bool,

    // Decimal places in rendered values, trailing zeros are trimmed
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            temperature: true,
            length: true,
            speed: true,
            mass: true,
            precision: default_precision(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimestampConfig {
    // Accepted range, in seconds since the epoch
    #[serde(default = "default_min_seconds")]
    pub min_seconds: i64,
    #[serde(default = "default_max_seconds")]
    pub max_seconds: i64,

    // Render in UTC instead of the local timezone
    #[serde(default)]
    pub utc: bool,

    // Template for the main output line
    #[serde(default = "default_output_template")]
    pub output: String,

    // Extra named renderings (menu items), keyed by name
    #[serde(default = "default_templates")]
    pub templates: BTreeMap<String, String>,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            min_seconds: default_min_seconds(),
            max_seconds: default_max_seconds(),
            utc: false,
            output: default_output_template(),
            templates: default_templates(),
        }
    }
}

fn enabled() -> bool {
    true
}

fn default_precision() -> usize {
    2
}

// 1973-03-03, earlier 9 digit values are rarely timestamps
fn default_min_seconds() -> i64 {
    100_000_000
}

// Largest 10 digit value, 2286-11-20
fn default_max_seconds() -> i64 {
    9_999_999_999
}

fn default_output_template() -> String {
    "{datetime}".to_string()
}

fn default_templates() -> BTreeMap<String, String> {
    let mut templates = BTreeMap::new();
    templates.insert("relative".to_string(), "{relative}".to_string());
    templates.insert("utc".to_string(), "{utc}".to_string());
    templates
}

impl Config {
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self {
            debug: false,
            converters: ConvertersConfig::default(),
            units: UnitsConfig::default(),
            timestamp: TimestampConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestamp.min_seconds >= self.timestamp.max_seconds {
            return Err(ConfigError::Invalid(format!(
                "timestamp.min_seconds ({}) must be below timestamp.max_seconds ({})",
                self.timestamp.min_seconds, self.timestamp.max_seconds
            )));
        }

        if self.units.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "units.precision must be at most {}, got {}",
                MAX_PRECISION, self.units.precision
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::load_from_str("").unwrap();
        assert!(!config.debug);
        assert!(config.converters.timestamp);
        assert!(config.converters.simple_unit);
        assert!(config.units.temperature && config.units.length);
        assert_eq!(config.units.precision, 2);
        assert_eq!(config.timestamp.min_seconds, 100_000_000);
        assert_eq!(config.timestamp.output, "{datetime}");
        assert_eq!(config.timestamp.templates.len(), 2);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::load_from_str(
            r#"
debug = true

[converters]
timestamp = false

[units]
speed = false
precision = 4

[timestamp]
utc = true
output = "{date}"

[timestamp.templates]
iso = "{utc}"
"#,
        )
        .unwrap();

        assert!(config.debug);
        assert!(!config.converters.timestamp);
        assert!(config.converters.simple_unit);
        assert!(!config.units.speed);
        assert!(config.units.mass);
        assert_eq!(config.units.precision, 4);
        assert!(config.timestamp.utc);
        assert_eq!(config.timestamp.output, "{date}");
        assert_eq!(config.timestamp.templates.len(), 1);
        assert_eq!(config.timestamp.templates["iso"], "{utc}");
    }

    #[test]
    fn test_invalid_range_rejected() {
        let result = Config::load_from_str(
            r#"
[timestamp]
min_seconds = 100
max_seconds = 10
"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_precision_rejected() {
        let result = Config::load_from_str("[units]\nprecision = 40\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::load_from_str("[units\nprecision = 2");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load_from_file("/nonexistent/clipconv.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
