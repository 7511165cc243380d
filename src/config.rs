//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.salaryboard.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Completion model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path of the dataset file.
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    "data/salaries.json".to_string()
}

/// Completion model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name sent to the completion endpoint.
    #[serde(default = "default_model")]
    pub name: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. Usually set via the OPENAI_API_KEY environment variable
    /// instead of the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_url: default_api_url(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo-instruct".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    120
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include a drill-down table for every year in written reports.
    #[serde(default = "default_true")]
    pub include_drilldowns: bool,

    /// Maximum rows per drill-down table (0 = unlimited).
    #[serde(default = "default_max_title_rows")]
    pub max_title_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_drilldowns: true,
            max_title_rows: default_max_title_rows(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_title_rows() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".salaryboard.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Model settings - always override since they have defaults in CLI
        self.model.name = args.model.clone();
        self.model.api_url = args.api_url.clone();
        self.model.temperature = args.temperature;

        // Credential - env/CLI beats config file
        if args.api_key.is_some() {
            self.model.api_key = args.api_key.clone();
        }

        // Timeout - only override if explicitly provided via CLI
        if let Some(timeout) = args.timeout {
            self.model.timeout_seconds = timeout;
        }

        // Dataset path - only override if explicitly provided
        if let Some(ref data) = args.data {
            self.dataset.path = data.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.name, "gpt-3.5-turbo-instruct");
        assert_eq!(config.model.api_url, "https://api.openai.com");
        assert_eq!(config.dataset.path, "data/salaries.json");
        assert!(config.report.include_drilldowns);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[dataset]
path = "data/custom.csv"

[model]
name = "gpt-4o-mini"
temperature = 0.2
timeout_seconds = 60

[report]
max_title_rows = 5
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.dataset.path, "data/custom.csv");
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert_eq!(config.model.temperature, 0.2);
        assert_eq!(config.model.timeout_seconds, 60);
        assert_eq!(config.report.max_title_rows, 5);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[dataset]"));
        assert!(toml_str.contains("[model]"));
        assert!(toml_str.contains("[report]"));
    }
}
