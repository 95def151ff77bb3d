//! # Dashboard Configuration
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [simulation]
//! tick_ms = 2000
//! progress_step = 0.5
//! progress_ceiling = 99.0
//! temp_jitter = 0.5
//! seed = 7
//!
//! [kiosk]
//! clock_ms = 1000
//! title = "FIELDLAB"
//!
//! [booking]
//! poll_ms = 30000
//! mock_latency_ms = 500
//! endpoint = "https://booking.example.edu/api/v1/printer-bookings"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every field is optional; missing ones fall back to the defaults below.

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration struct for the dashboard service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub kiosk: KioskConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Sensor drift simulation applied to printing records.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_progress_step")]
    pub progress_step: f64,
    #[serde(default = "default_progress_ceiling")]
    pub progress_ceiling: f64,
    /// Half-width of the uniform nozzle temperature perturbation.
    #[serde(default = "default_temp_jitter")]
    pub temp_jitter: f64,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            progress_step: default_progress_step(),
            progress_ceiling: default_progress_ceiling(),
            temp_jitter: default_temp_jitter(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Full-screen visualization settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KioskConfig {
    #[serde(default = "default_clock_ms")]
    pub clock_ms: u64,
    #[serde(default = "default_kiosk_title")]
    pub title: String,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            clock_ms: default_clock_ms(),
            title: default_kiosk_title(),
        }
    }
}

impl KioskConfig {
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_ms)
    }
}

/// Booking feed polling. `endpoint` and `token` describe the future HTTP
/// integration; only the mock source reads this section today.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingConfig {
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            poll_ms: default_poll_ms(),
            mock_latency_ms: default_mock_latency_ms(),
            retry_base_ms: default_retry_base_ms(),
            endpoint: None,
            token: None,
        }
    }
}

impl BookingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }

    pub fn retry_base(&self) -> Duration {
        Duration::from_millis(self.retry_base_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl LoggingConfig {
    /// Parses the configured level, falling back to INFO for unknown names.
    pub fn max_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl Config {
    /// Reject settings the timers and the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.tick_ms == 0 {
            return Err(ConfigError::Invalid("simulation.tick_ms must be > 0".to_string()));
        }
        if self.kiosk.clock_ms == 0 {
            return Err(ConfigError::Invalid("kiosk.clock_ms must be > 0".to_string()));
        }
        if self.booking.poll_ms == 0 {
            return Err(ConfigError::Invalid("booking.poll_ms must be > 0".to_string()));
        }
        let ceiling = self.simulation.progress_ceiling;
        if !(ceiling > 0.0 && ceiling <= 100.0) {
            return Err(ConfigError::Invalid(format!(
                "simulation.progress_ceiling must be in (0, 100], got {}",
                ceiling
            )));
        }
        let step = self.simulation.progress_step;
        if !step.is_finite() || step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "simulation.progress_step must be finite and >= 0, got {}",
                step
            )));
        }
        // The jitter range spans 2 * temp_jitter and must not overflow.
        let jitter = self.simulation.temp_jitter;
        if !(2.0 * jitter).is_finite() || jitter < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "simulation.temp_jitter must be finite and >= 0, got {}",
                jitter
            )));
        }
        Ok(())
    }
}

// Default value functions
fn default_bind() -> String { "0.0.0.0:3000".to_string() }
fn default_tick_ms() -> u64 { 2000 }
fn default_progress_step() -> f64 { 0.5 }
fn default_progress_ceiling() -> f64 { 99.0 }
fn default_temp_jitter() -> f64 { 0.5 }
fn default_clock_ms() -> u64 { 1000 }
fn default_kiosk_title() -> String { "FIELDLAB".to_string() }
fn default_poll_ms() -> u64 { 30_000 }
fn default_mock_latency_ms() -> u64 { 500 }
fn default_retry_base_ms() -> u64 { 1000 }
fn default_log_level() -> String { "info".to_string() }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!("Failed to read config file '{}': {}", path.display(), e);
        ConfigError::Io(e)
    })?;
    let config: Config = toml::from_str(&contents).map_err(|e| {
        tracing::error!("Failed to parse config TOML: {}", e);
        ConfigError::Toml(e)
    })?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!("Config file '{}' not found, using defaults", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}
