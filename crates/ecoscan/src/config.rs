//! Configuration handling for EcoScan.
//!
//! Settings load from a TOML file with per-field defaults, so a missing or
//! partial file is always usable. The model API key additionally resolves
//! from the `GEMINI_API_KEY` environment variable, which takes priority over
//! the file.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use ecoscan_server::ScanLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Vision model configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Image payload validation
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Demo mode configuration
    #[serde(default)]
    pub demo: DemoConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vision-model-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// API key; `GEMINI_API_KEY` in the environment takes priority
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    ecoscan_vision::DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    ecoscan_vision::DEFAULT_API_BASE.to_string()
}

fn default_temperature() -> f64 {
    0.05
}

fn default_max_output_tokens() -> u32 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base: default_api_base(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Image payload validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum estimated image size (bytes)
    #[serde(default = "default_min_image_bytes")]
    pub min_image_bytes: u64,

    /// Maximum estimated image size (megabytes)
    #[serde(default = "default_max_image_mb")]
    pub max_image_mb: u64,
}

fn default_min_image_bytes() -> u64 {
    100
}

fn default_max_image_mb() -> u64 {
    4
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_image_bytes: default_min_image_bytes(),
            max_image_mb: default_max_image_mb(),
        }
    }
}

impl ValidationConfig {
    /// Convert to the server's limit type.
    pub fn limits(&self) -> ScanLimits {
        ScanLimits {
            min_image_bytes: self.min_image_bytes,
            max_image_mb: self.max_image_mb,
        }
    }
}

/// Demo mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Use the canned model instead of the live API
    #[serde(default)]
    pub mock: bool,

    /// Artificial reply delay for the canned model (milliseconds)
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
}

fn default_mock_delay_ms() -> u64 {
    1500
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mock: false,
            mock_delay_ms: default_mock_delay_ms(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load from the default config path, or defaults if no file exists.
    pub fn load() -> Result<Config> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load from an explicit path, or fall back to [`Config::load`].
    pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
        match path {
            Some(path) => Self::read(&path),
            None => Self::load(),
        }
    }

    fn read(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Default config file path.
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Sample configuration file contents.
    pub fn sample_toml() -> Result<String> {
        let body =
            toml::to_string_pretty(&Config::default()).context("failed to serialize config")?;
        Ok(format!(
            "# EcoScan configuration\n# Save to the path shown by `ecoscan config path`.\n\n{body}"
        ))
    }

    /// Resolve the model API key: environment first, then the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.model.api_key.clone())
    }
}

/// Get the config directory for EcoScan.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ECOSCAN_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "ecoscan").map(|dirs| dirs.config_dir().to_path_buf())
}
