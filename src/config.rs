//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section is optional; missing sections and keys take their defaults.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::descriptor::registry::{SourceKind, WiredSystem};
use crate::error::{OracleError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dut: DutConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the DUT is reached
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Tcp,
    Serial,
}

/// DUT link configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DutConfig {
    #[serde(default = "default_dut_enabled")]
    pub enabled: bool,

    #[serde(default = "default_transport")]
    pub transport: TransportKind,

    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_serial_port")]
    pub serial_port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Device handle every command is addressed to
    #[serde(default)]
    pub handle: u8,

    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,

    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,

    #[serde(default = "default_max_lines_per_response")]
    pub max_lines_per_response: usize,
}

/// Model configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OracleConfig {
    #[serde(default = "default_deadzone_fraction")]
    pub deadzone_fraction: f32,

    /// Wireless profile name, see [`SourceKind::name`]
    #[serde(default = "default_source")]
    pub source: String,

    /// Wired system name, see [`WiredSystem::name`]
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Overrides the name the source is announced with
    #[serde(default)]
    pub device_name: Option<String>,
}

/// Scenario results configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ResultsConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_results_path")]
    pub path: String,

    #[serde(default = "default_results_format")]
    pub format: String,
}

/// Log output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub file: Option<String>,
}

// Default value functions
fn default_dut_enabled() -> bool { false }
fn default_transport() -> TransportKind { TransportKind::Tcp }
fn default_address() -> String { "localhost:5555".to_string() }
fn default_serial_port() -> String { "/dev/ttyUSB0".to_string() }
fn default_baud_rate() -> u32 { 921600 }
fn default_response_timeout_ms() -> u64 { 1000 }
fn default_connect_retries() -> u32 { 3 }
fn default_retry_interval_ms() -> u64 { 1000 }
fn default_max_lines_per_response() -> usize { 64 }

fn default_deadzone_fraction() -> f32 { crate::mapping::axis::DEFAULT_DEADZONE_FRACTION }
fn default_source() -> String { "ps4".to_string() }
fn default_destination() -> String { "gc".to_string() }

fn default_results_path() -> String { "./results/oracle.jsonl".to_string() }
fn default_results_format() -> String { "jsonl".to_string() }

fn default_log_level() -> String { "info".to_string() }

impl Default for DutConfig {
    fn default() -> Self {
        Self {
            enabled: default_dut_enabled(),
            transport: default_transport(),
            address: default_address(),
            serial_port: default_serial_port(),
            baud_rate: default_baud_rate(),
            handle: 0,
            response_timeout_ms: default_response_timeout_ms(),
            connect_retries: default_connect_retries(),
            retry_interval_ms: default_retry_interval_ms(),
            max_lines_per_response: default_max_lines_per_response(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            deadzone_fraction: default_deadzone_fraction(),
            source: default_source(),
            destination: default_destination(),
            device_name: None,
        }
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_results_path(),
            format: default_results_format(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl OracleConfig {
    /// Resolve the configured wireless profile
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownProfile` if no profile has that name
    pub fn source_kind(&self) -> Result<SourceKind> {
        SourceKind::from_name(&self.source)
    }

    /// Resolve the configured wired system
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownProfile` if no system has that name
    pub fn wired_system(&self) -> Result<WiredSystem> {
        WiredSystem::from_name(&self.destination)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use retropad_oracle::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range or
    /// names an unknown profile
    pub fn validate(&self) -> Result<()> {
        if self.dut.response_timeout_ms == 0 || self.dut.response_timeout_ms > 10000 {
            return Err(OracleError::Config(
                toml::de::Error::custom("response_timeout_ms must be between 1 and 10000")
            ));
        }

        if self.dut.connect_retries == 0 || self.dut.connect_retries > 10 {
            return Err(OracleError::Config(
                toml::de::Error::custom("connect_retries must be between 1 and 10")
            ));
        }

        if self.dut.max_lines_per_response == 0 {
            return Err(OracleError::Config(
                toml::de::Error::custom("max_lines_per_response must be greater than 0")
            ));
        }

        match self.dut.transport {
            TransportKind::Tcp if self.dut.address.is_empty() => {
                return Err(OracleError::Config(
                    toml::de::Error::custom("address cannot be empty for tcp transport")
                ));
            }
            TransportKind::Serial if self.dut.serial_port.is_empty() => {
                return Err(OracleError::Config(
                    toml::de::Error::custom("serial_port cannot be empty for serial transport")
                ));
            }
            _ => {}
        }

        if !(0.0..0.5).contains(&self.oracle.deadzone_fraction) {
            return Err(OracleError::Config(
                toml::de::Error::custom("deadzone_fraction must be in [0.0, 0.5)")
            ));
        }

        self.oracle.source_kind()?;
        self.oracle.wired_system()?;

        if matches!(&self.oracle.device_name, Some(name) if name.is_empty() || name.contains('\0')) {
            return Err(OracleError::Config(
                toml::de::Error::custom("device_name must be non-empty and contain no NUL")
            ));
        }

        if self.results.enabled && self.results.path.is_empty() {
            return Err(OracleError::Config(
                toml::de::Error::custom("results path cannot be empty when enabled")
            ));
        }

        if self.results.format != "jsonl" {
            return Err(OracleError::Config(
                toml::de::Error::custom("results format must be 'jsonl' (only supported format)")
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(OracleError::Config(
                toml::de::Error::custom("logging level cannot be empty")
            ));
        }

        Ok(())
    }
}
