//! Configuration infrastructure
//!
//! Settings are layered, lowest precedence first:
//! 1. Built-in defaults (`AppConfig::default()`)
//! 2. Optional JSON config file
//! 3. `SHELF_SCOUT__SECTION__KEY` environment variables
//!
//! Mail credentials come from `EMAIL_USER` / `EMAIL_PASS` and are read once
//! here; the rest of the crate receives them as plain config values.

use crate::domain::constants::site;
use crate::infrastructure::parsing::{CompiledPatterns, FieldPatterns};
use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input document and extraction rules
    pub extraction: ExtractionConfig,

    /// Report artifacts
    pub report: ReportConfig,

    /// Report delivery
    pub dispatch: DispatchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Saved category page to read
    pub document_path: PathBuf,

    /// Brand token product names must contain
    pub brand: String,

    /// Site origin for relative links
    pub base_url: String,

    /// Styling-coupled pattern table
    pub patterns: FieldPatterns,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory receiving report files
    pub output_dir: PathBuf,

    /// File name without extension
    pub file_stem: String,

    /// Write the HTML table report
    pub html: bool,

    /// Write the JSON export
    pub json: bool,
}

/// Report delivery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Send the report after writing it
    pub enabled: bool,

    /// Fixed recipient address
    pub recipient: String,

    /// Message subject
    pub subject: String,

    /// Mail relay messages endpoint; dispatch is skipped when unset
    pub relay_endpoint: Option<String>,

    /// Relay request timeout in seconds
    pub timeout_seconds: u64,

    /// Sender credentials, never written back to disk
    #[serde(skip_serializing)]
    pub credentials: Option<MailCredentials>,
}

/// Mail sender credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailCredentials {
    pub user: String,
    pub password: String,
}

impl MailCredentials {
    pub const USER_VAR: &'static str = "EMAIL_USER";
    pub const PASSWORD_VAR: &'static str = "EMAIL_PASS";

    /// Credentials from `EMAIL_USER` / `EMAIL_PASS`; `None` unless both are set and non-blank
    pub fn from_env() -> Option<Self> {
        Self::from_parts(
            std::env::var(Self::USER_VAR).ok(),
            std::env::var(Self::PASSWORD_VAR).ok(),
        )
    }

    pub fn from_parts(user: Option<String>, password: Option<String>) -> Option<Self> {
        let user = user.filter(|u| !u.trim().is_empty())?;
        let password = password.filter(|p| !p.is_empty())?;
        Some(Self { user, password })
    }
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted file logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files
    pub log_dir: PathBuf,

    /// Number of log files to keep (older files will be deleted)
    pub max_files: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from(site::DEFAULT_DOCUMENT_PATH),
            brand: site::DEFAULT_BRAND.to_string(),
            base_url: site::BASE_URL.to_string(),
            patterns: FieldPatterns::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(defaults::REPORT_DIR),
            file_stem: defaults::REPORT_FILE_STEM.to_string(),
            html: true,
            json: true,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            recipient: defaults::DISPATCH_RECIPIENT.to_string(),
            subject: defaults::DISPATCH_SUBJECT.to_string(),
            relay_endpoint: None,
            timeout_seconds: defaults::DISPATCH_TIMEOUT_SECONDS,
            credentials: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: PathBuf::from(defaults::LOG_DIR),
            max_files: defaults::LOG_MAX_FILES,
        }
    }
}

impl AppConfig {
    /// Reject settings that would make the run meaningless
    pub fn validate(&self) -> ParsingResult<()> {
        if self.extraction.brand.trim().is_empty() {
            return Err(ParsingError::configuration(
                "extraction.brand",
                "brand token must not be blank",
            ));
        }

        let base = Url::parse(&self.extraction.base_url).map_err(|e| {
            ParsingError::configuration("extraction.base_url", format!("invalid base URL: {e}"))
        })?;
        if base.host_str().is_none() {
            return Err(ParsingError::configuration(
                "extraction.base_url",
                "base URL must have a host",
            ));
        }

        CompiledPatterns::compile(&self.extraction.patterns)?;

        if self.report.file_stem.trim().is_empty() {
            return Err(ParsingError::configuration(
                "report.file_stem",
                "file stem must not be blank",
            ));
        }
        if !self.report.html && !self.report.json {
            return Err(ParsingError::configuration(
                "report",
                "at least one report format must be enabled",
            ));
        }
        if self.dispatch.enabled && self.dispatch.recipient.trim().is_empty() {
            return Err(ParsingError::configuration(
                "dispatch.recipient",
                "recipient must be set when dispatch is enabled",
            ));
        }
        Ok(())
    }
}

/// Configuration manager for loading layered settings
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager reading the default config file in the working directory
    pub fn new() -> Self {
        Self::with_path(defaults::CONFIG_FILE)
    }

    /// Manager reading the given config file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Load configuration from defaults, file and environment
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = self.load_layers()?;
        if config.dispatch.credentials.is_none() {
            config.dispatch.credentials = MailCredentials::from_env();
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Defaults, file and `SHELF_SCOUT__*` variables, without credentials
    pub fn load_layers(&self) -> Result<AppConfig> {
        let settings = Config::builder()
            .add_source(File::from(self.config_path.as_path()).required(false))
            .add_source(
                Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {:?}", self.config_path))?;

        settings
            .try_deserialize::<AppConfig>()
            .context("Failed to parse configuration")
    }

    /// Write a configuration file with every default filled in
    pub async fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(&AppConfig::default())
            .context("Failed to serialize configuration")?;
        tokio::fs::write(path, content)
            .await
            .context("Failed to write configuration file")?;
        info!("Saved default configuration to: {:?}", path);
        Ok(())
    }

    /// Where settings came from, for the startup log line
    ///
    /// `load` runs before the log subscriber exists, so callers log this
    /// once logging is up.
    pub fn source_description(&self) -> String {
        if self.config_path.is_file() {
            format!("{} + environment", self.config_path.display())
        } else {
            format!(
                "defaults + environment ({} not found)",
                self.config_path.display()
            )
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Default configuration values
pub mod defaults {
    /// Default config file name
    pub const CONFIG_FILE: &str = "shelf_scout_config.json";

    /// Environment variable prefix for overrides
    pub const ENV_PREFIX: &str = "SHELF_SCOUT";

    /// Default report directory
    pub const REPORT_DIR: &str = "reports";

    /// Default report file stem
    pub const REPORT_FILE_STEM: &str = "blinkit_rosier_products";

    /// Default report recipient
    pub const DISPATCH_RECIPIENT: &str = "automailer@example.com";

    /// Default report subject
    pub const DISPATCH_SUBJECT: &str = "Blinkit - Latest Rosier Products";

    /// Default relay timeout in seconds
    pub const DISPATCH_TIMEOUT_SECONDS: u64 = 30;

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default console output setting
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// Default file output setting
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Default log directory
    pub const LOG_DIR: &str = "logs";

    /// Default maximum log files to keep
    pub const LOG_MAX_FILES: u32 = 5;
}
