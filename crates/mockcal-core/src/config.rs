use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::operation::Operation;

/// Latencies above this are almost certainly a typo.
const SLOW_LATENCY_MS: u64 = 10_000;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Simulated latency per operation
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Calendar display and fetch settings
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Injected failures
    #[serde(default)]
    pub faults: FaultConfig,
}

/// Simulated round-trip time of each mock operation, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub sign_in_ms: u64,
    pub sign_out_ms: u64,
    pub fetch_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub delete_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            sign_in_ms: 1000,
            sign_out_ms: 500,
            fetch_ms: 800,
            create_ms: 1000,
            update_ms: 800,
            delete_ms: 600,
        }
    }
}

impl LatencyConfig {
    /// Same latency for every operation; `zero()` is handy for hosts that want instant responses.
    pub fn uniform(ms: u64) -> Self {
        Self {
            sign_in_ms: ms,
            sign_out_ms: ms,
            fetch_ms: ms,
            create_ms: ms,
            update_ms: ms,
            delete_ms: ms,
        }
    }

    pub fn zero() -> Self {
        Self::uniform(0)
    }

    pub fn for_operation(&self, op: Operation) -> Duration {
        let ms = match op {
            Operation::SignIn => self.sign_in_ms,
            Operation::SignOut => self.sign_out_ms,
            Operation::FetchEvents => self.fetch_ms,
            Operation::CreateEvent => self.create_ms,
            Operation::UpdateEvent => self.update_ms,
            Operation::DeleteEvent => self.delete_ms,
        };
        Duration::from_millis(ms)
    }
}

/// First day of the week used by week views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Color given to created events that have none
    pub default_color: String,

    pub week_start: WeekStart,

    /// Months loaded before the current date on every refetch
    pub fetch_months_before: u32,

    /// Months loaded after the current date on every refetch
    pub fetch_months_after: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_color: "#1890ff".to_string(),
            week_start: WeekStart::Sunday,
            fetch_months_before: 1,
            fetch_months_after: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    /// Operations that always fail after their simulated latency
    pub fail_operations: Vec<Operation>,
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config = Self::parse(&contents)?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        Self::validated(Self::load()?)
    }

    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult)> {
        Self::validated(Self::load_from(path)?)
    }

    fn validated(config: Self) -> Result<(Self, ValidationResult)> {
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for op in Operation::ALL {
            let latency = self.latency.for_operation(op);
            if latency.as_millis() > u128::from(SLOW_LATENCY_MS) {
                result.add_warning(
                    format!("latency.{}", op),
                    format!("Latency of {:?} is unusually large", latency),
                );
            }
        }

        if !is_color_token(&self.calendar.default_color) {
            result.add_error(
                "calendar.default_color",
                format!(
                    "Expected a hex color like #1890ff, got: {}",
                    self.calendar.default_color
                ),
            );
        }

        if self.calendar.fetch_months_before == 0 && self.calendar.fetch_months_after == 0 {
            result.add_error(
                "calendar.fetch_months",
                "Fetch window must span at least one month",
            );
        }

        if !self.faults.fail_operations.is_empty() {
            result.add_warning(
                "faults.fail_operations",
                format!(
                    "Injected failures enabled for: {}",
                    self.faults
                        .fail_operations
                        .iter()
                        .map(|op| op.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            );
        }

        result
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("mockcal");

        Ok(config_dir.join("config.toml"))
    }
}

/// `#rgb` or `#rrggbb`.
fn is_color_token(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_default_latencies() {
        let latency = LatencyConfig::default();
        assert_eq!(latency.for_operation(Operation::SignIn), Duration::from_millis(1000));
        assert_eq!(latency.for_operation(Operation::SignOut), Duration::from_millis(500));
        assert_eq!(latency.for_operation(Operation::DeleteEvent), Duration::from_millis(600));
    }

    #[test]
    fn test_invalid_color() {
        let mut config = Config::default();
        config.calendar.default_color = "blue".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "calendar.default_color"));
    }

    #[test]
    fn test_short_color_is_valid() {
        assert!(is_color_token("#fff"));
        assert!(!is_color_token("#ffff"));
        assert!(!is_color_token("#zzzzzz"));
    }

    #[test]
    fn test_empty_fetch_window() {
        let mut config = Config::default();
        config.calendar.fetch_months_before = 0;
        config.calendar.fetch_months_after = 0;
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_faults_are_warning() {
        let mut config = Config::default();
        config.faults.fail_operations = vec![Operation::CreateEvent];
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.message.contains("create_event")));
    }

    #[test]
    fn test_slow_latency_is_warning() {
        let mut config = Config::default();
        config.latency.fetch_ms = 60_000;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "latency.fetch_events"));
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
            [latency]
            create_ms = 50

            [calendar]
            week_start = "monday"

            [faults]
            fail_operations = ["sign_in", "delete_event"]
            "#,
        )
        .unwrap();

        assert_eq!(config.latency.create_ms, 50);
        assert_eq!(config.latency.sign_in_ms, 1000);
        assert_eq!(config.calendar.week_start, WeekStart::Monday);
        assert_eq!(config.calendar.default_color, "#1890ff");
        assert_eq!(
            config.faults.fail_operations,
            vec![Operation::SignIn, Operation::DeleteEvent]
        );
    }

    #[test]
    fn test_parse_unknown_operation_fails() {
        let err = Config::parse("[faults]\nfail_operations = [\"reboot\"]").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_validated_rejects_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar]\ndefault_color = \"red\"\n").unwrap();

        let err = Config::load_validated_from(&path).unwrap_err();
        assert!(err.to_string().contains("calendar.default_color"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
