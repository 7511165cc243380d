//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Salaryboard - tech-salary dashboard with LLM-powered Q&A
///
/// Aggregates a static dataset of technology-job salary records by year,
/// drills down into job titles for a selected year, and answers free-text
/// questions about the data through an OpenAI-compatible completion API.
///
/// Examples:
///   salaryboard
///   salaryboard --data data/salaries.csv --year 2022
///   salaryboard --ask "Which year had the highest average salary?"
///   salaryboard --interactive
///   salaryboard --output dashboard.md --format markdown
///   salaryboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the dataset file (.json or .csv)
    ///
    /// Defaults to data/salaries.json (or the path from .salaryboard.toml).
    #[arg(short, long, value_name = "FILE", env = "SALARYBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Drill down into one year's job titles
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<u16>,

    /// Ask a free-text question about the dataset
    ///
    /// Sends the entire dataset plus the question to the completion API.
    /// Requires an API key (OPENAI_API_KEY).
    #[arg(short, long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Run the interactive dashboard loop
    ///
    /// Type a year to drill down, 'back' to dismiss, 'ask <question>' to
    /// query the completion service, 'quit' to exit.
    #[arg(short, long)]
    pub interactive: bool,

    /// Write a report of the computed summaries to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Model to use for the completion API
    #[arg(
        short,
        long,
        default_value = "gpt-3.5-turbo-instruct",
        env = "SALARYBOARD_MODEL"
    )]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = "https://api.openai.com", env = "OPENAI_BASE_URL")]
    pub api_url: String,

    /// API key for the completion service
    ///
    /// Only needed for --ask and the interactive 'ask' command.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Temperature for completion responses (0.0 - 2.0)
    #[arg(long, default_value = "0.7")]
    pub temperature: f32,

    /// Request timeout in seconds for the completion API
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .salaryboard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .salaryboard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for written reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate API URL format (only matters when asking)
        if self.ask.is_some() || self.interactive {
            if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate temperature range
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 2.0".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.interactive && self.ask.is_some() {
            return Err("Cannot use both --interactive and --ask".to_string());
        }

        // Validate dataset path if provided
        if let Some(ref data_path) = self.data {
            if !data_path.exists() {
                return Err(format!(
                    "Dataset file does not exist: {}",
                    data_path.display()
                ));
            }
            if !data_path.is_file() {
                return Err(format!("Dataset path is not a file: {}", data_path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            year: None,
            ask: None,
            interactive: false,
            output: None,
            format: OutputFormat::Markdown,
            model: "gpt-3.5-turbo-instruct".to_string(),
            api_url: "https://api.openai.com".to_string(),
            api_key: None,
            temperature: 0.7,
            timeout: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_default_args() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_api_url() {
        let mut args = make_args();
        args.ask = Some("test question".to_string());
        args.api_url = "localhost:11434".to_string();
        assert!(args.validate().is_err());

        // The API URL is only checked when the chat path is used.
        args.ask = None;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_temperature_range() {
        let mut args = make_args();
        args.temperature = 2.5;
        assert!(args.validate().is_err());

        args.temperature = 0.0;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.interactive = true;
        args.ask = Some("question".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_dataset() {
        let mut args = make_args();
        args.data = Some(PathBuf::from("/nonexistent/salaries.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
