use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of days a category keeps its log files unless told otherwise.
pub const DEFAULT_MAX_LOG_DAYS: u32 = 5;

/// Extension used when a category does not name one.
pub const DEFAULT_EXTENSION: &str = "log";

/// A named log stream: where its daily files live and how long they are kept.
///
/// Every file of a category is named `<file_prefix>-<YYYY-MM-DD>.<extension>`
/// inside `directory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogCategory {
    /// Directory holding the daily files
    pub directory: PathBuf,
    /// Prefix placed before the date in every file name
    pub file_prefix: String,
    /// File extension, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Name the logger identifies itself with on every line
    pub logger_name: String,
    /// Files dated more than this many days before today are deleted by a sweep
    #[serde(default = "default_max_log_days")]
    pub max_log_days: u32,
    /// Filter directive for records written to the file (e.g. "info")
    #[serde(default = "default_level")]
    pub level: String,
    /// Line layout
    #[serde(default)]
    pub format: LineFormat,
    /// Create `directory` on acquisition instead of failing when it is missing
    #[serde(default)]
    pub create_dir: bool,
}

impl LogCategory {
    /// Create a category with the default extension and retention window.
    pub fn new(
        directory: impl Into<PathBuf>,
        file_prefix: impl Into<String>,
        logger_name: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: file_prefix.into(),
            extension: default_extension(),
            logger_name: logger_name.into(),
            max_log_days: DEFAULT_MAX_LOG_DAYS,
            level: default_level(),
            format: LineFormat::default(),
            create_dir: false,
        }
    }

    /// Set the file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the retention window in days
    pub fn with_max_log_days(mut self, days: u32) -> Self {
        self.max_log_days = days;
        self
    }

    /// Set the filter directive
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the line layout
    pub fn with_format(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    /// Create the directory on acquisition when it is missing
    pub fn with_create_dir(mut self, create_dir: bool) -> Self {
        self.create_dir = create_dir;
        self
    }

    /// Check that the category can produce well-formed file names.
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(Error::Config("directory must not be empty".to_string()));
        }
        if self.logger_name.trim().is_empty() {
            return Err(Error::Config("logger name must not be empty".to_string()));
        }
        check_name_part("file prefix", &self.file_prefix)?;
        check_name_part("extension", &self.extension)?;
        if self.extension.starts_with('.') {
            return Err(Error::Config(format!(
                "extension must not start with a dot: {}",
                self.extension
            )));
        }
        Ok(())
    }
}

fn check_name_part(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Config(format!("{} must not be empty", what)));
    }
    if value.contains(['/', '\\']) {
        return Err(Error::Config(format!(
            "{} must not contain a path separator: {}",
            what, value
        )));
    }
    Ok(())
}

/// Layout of a single line in a category file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFormat {
    /// Prefix each line with a timestamp
    #[serde(default = "default_true")]
    pub timestamp: bool,
    /// Print the category's logger name on each line
    #[serde(default = "default_true")]
    pub logger_name: bool,
    /// Write `{}` even when a record carries no context
    #[serde(default)]
    pub empty_context: bool,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            timestamp: true,
            logger_name: true,
            empty_context: false,
        }
    }
}

/// Console output for the crate's own diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Enable console output
    #[serde(default)]
    pub console: bool,
    /// Console log level (e.g., "info", "debug")
    #[serde(default = "default_diagnostics_level")]
    pub level: String,
}

impl DiagnosticsConfig {
    /// Create a new DiagnosticsConfig with defaults
    pub fn new() -> Self {
        Self {
            console: false,
            level: default_diagnostics_level(),
        }
    }

    /// Enable console output
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Set log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_max_log_days() -> u32 {
    DEFAULT_MAX_LOG_DAYS
}

fn default_level() -> String {
    "debug".to_string()
}

fn default_diagnostics_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_category_new() {
        let category = LogCategory::new("/logs", "app", "application");
        assert_eq!(category.directory, PathBuf::from("/logs"));
        assert_eq!(category.file_prefix, "app");
        assert_eq!(category.extension, "log");
        assert_eq!(category.logger_name, "application");
        assert_eq!(category.max_log_days, DEFAULT_MAX_LOG_DAYS);
        assert_eq!(category.level, "debug");
        assert_eq!(category.format, LineFormat::default());
        assert!(!category.create_dir);
    }

    #[test]
    fn test_log_category_overrides() {
        let category = LogCategory::new("/logs", "access", "http")
            .with_extension("txt")
            .with_max_log_days(30)
            .with_level("warn")
            .with_create_dir(true);
        assert_eq!(category.extension, "txt");
        assert_eq!(category.max_log_days, 30);
        assert_eq!(category.level, "warn");
        assert!(category.create_dir);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(LogCategory::new("logs", "app", "app").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let cases = [
            LogCategory::new("", "app", "app"),
            LogCategory::new("logs", "", "app"),
            LogCategory::new("logs", "app", "  "),
            LogCategory::new("logs", "app", "app").with_extension(""),
        ];
        for category in cases {
            assert!(
                matches!(category.validate(), Err(Error::Config(_))),
                "{:?} should be rejected",
                category
            );
        }
    }

    #[test]
    fn test_validate_rejects_separators_and_dotted_extension() {
        let prefix = LogCategory::new("logs", "nested/app", "app");
        assert!(matches!(prefix.validate(), Err(Error::Config(_))));

        let ext = LogCategory::new("logs", "app", "app").with_extension(".log");
        assert!(matches!(ext.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_category_from_toml_uses_defaults() {
        let toml = r#"
directory = "/var/log/shop"
file_prefix = "orders"
logger_name = "orders"
"#;
        let category: LogCategory = toml::from_str(toml).unwrap();
        assert_eq!(category, LogCategory::new("/var/log/shop", "orders", "orders"));
    }

    #[test]
    fn test_category_from_yaml_with_overrides() {
        let yaml = r#"
directory: logs
file_prefix: errors
extension: txt
logger_name: errors
max_log_days: 0
level: error
create_dir: true
format:
  timestamp: false
"#;
        let category: LogCategory = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(category.extension, "txt");
        assert_eq!(category.max_log_days, 0);
        assert_eq!(category.level, "error");
        assert!(category.create_dir);
        assert!(!category.format.timestamp);
        assert!(category.format.logger_name);
        assert!(!category.format.empty_context);
    }

    #[test]
    fn test_diagnostics_config_defaults() {
        let config = DiagnosticsConfig::default();
        assert!(!config.console);
        assert_eq!(config.level, "info");

        let config = DiagnosticsConfig::new().with_console(true).with_level("debug");
        assert!(config.console);
        assert_eq!(config.level, "debug");
    }
}
