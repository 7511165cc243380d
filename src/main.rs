//! Salaryboard - tech-salary dashboard with LLM-powered Q&A
//!
//! A CLI tool that aggregates a static dataset of technology-job salary
//! records by year, drills down into job titles for a selected year, and
//! forwards free-text questions about the data to an OpenAI-compatible
//! completion API.
//!
//! Exit codes:
//!   0 - Success (including a failed completion call, which is reported
//!       as a fixed fallback message)
//!   1 - Runtime or configuration error (unreadable dataset, missing
//!       API key on the chat path, etc.)

mod analysis;
mod chat;
mod cli;
mod config;
mod dashboard;
mod dataset;
mod models;
mod report;

use anyhow::{bail, Context, Result};
use chat::{ChatOptions, CompletionClient, FALLBACK_REPLY};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{DashboardReport, ReportMetadata};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Salaryboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_dashboard(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Dashboard failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .salaryboard.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".salaryboard.toml");

    if path.exists() {
        eprintln!("⚠️  .salaryboard.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .salaryboard.toml")?;

    println!("✅ Created .salaryboard.toml with default settings.");
    println!("   Edit it to customize the dataset path, model, and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete dashboard workflow.
async fn run_dashboard(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the dataset
    let data_path = Path::new(&config.dataset.path);
    info!("Loading dataset: {}", data_path.display());

    let dataset = dataset::load(data_path)
        .with_context(|| format!("Failed to load dataset: {}", data_path.display()))?;

    if dataset.skipped > 0 {
        warn!(
            "Skipped {} malformed rows in {}",
            dataset.skipped,
            data_path.display()
        );
    }
    info!("Loaded {} salary records", dataset.records.len());

    // Step 2: Compute and display the yearly summary
    let years = analysis::summarize_by_year(&dataset.records);

    // Interactive mode renders everything itself
    if args.interactive {
        let chat = build_chat_client_optional(&config)?;
        return dashboard::run_interactive(
            &dataset.records,
            config.report.max_title_rows,
            chat.as_ref(),
        )
        .await;
    }

    println!("\n📊 Tech Jobs and Salary Details\n");
    print!("{}", report::render_year_table(&years));

    // Step 3: Drill down if a year was selected
    let mut selection = dashboard::Selection::new();
    if let Some(year) = args.year {
        selection.select(year);
        println!("\nTotal Jobs for Year {}", year);
        print!(
            "{}",
            report::render_title_table(
                &analysis::summarize_job_titles(&dataset.records, year),
                config.report.max_title_rows,
            )
        );
    }

    // Step 4: Answer a free-text question
    if let Some(ref question) = args.ask {
        let client = build_chat_client(&config)?;
        let answer = ask_with_spinner(&client, question, &dataset.records).await;
        println!("\n💬 {}", answer);
    }

    // Step 5: Write a report if requested
    if let Some(ref output) = args.output {
        let report = build_report(&config, &dataset, &years, selection.selected_year());

        let content = match args.format {
            OutputFormat::Markdown => report::generate_markdown_report(&report),
            OutputFormat::Json => report::generate_json_report(&report)?,
        };

        std::fs::write(output, &content)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;
        println!("\n✅ Report saved to: {}", output.display());
    }

    Ok(())
}

/// Build the chat client, failing when no credential is configured.
fn build_chat_client(config: &Config) -> Result<CompletionClient> {
    match build_chat_client_optional(config)? {
        Some(client) => Ok(client),
        None => bail!(
            "No API key configured. Set OPENAI_API_KEY (or [model] api_key in .salaryboard.toml) to ask questions."
        ),
    }
}

/// Build the chat client when a credential is configured.
fn build_chat_client_optional(config: &Config) -> Result<Option<CompletionClient>> {
    let Some(ref api_key) = config.model.api_key else {
        return Ok(None);
    };

    let options = ChatOptions {
        api_url: config.model.api_url.clone(),
        api_key: api_key.clone(),
        model: config.model.name.clone(),
        temperature: config.model.temperature,
        max_tokens: config.model.max_tokens,
        timeout_seconds: config.model.timeout_seconds,
    };

    let client = CompletionClient::new(options).context("Failed to create completion client")?;
    Ok(Some(client))
}

/// Ask the completion service, showing a spinner while waiting.
///
/// Failures become the fixed fallback reply; details go to the log.
async fn ask_with_spinner(
    client: &CompletionClient,
    question: &str,
    records: &[models::SalaryRecord],
) -> String {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message("Asking the completion service...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = client.ask(question, records).await;
    spinner.finish_and_clear();

    match result {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Completion request failed: {}", e);
            FALLBACK_REPLY.to_string()
        }
    }
}

/// Assemble the report structure from the computed summaries.
fn build_report(
    config: &Config,
    dataset: &dataset::Dataset,
    years: &[models::YearSummary],
    selected_year: Option<u16>,
) -> DashboardReport {
    let drilldown_years: Vec<u16> = if let Some(year) = selected_year {
        vec![year]
    } else if config.report.include_drilldowns {
        analysis::distinct_years(&dataset.records)
    } else {
        Vec::new()
    };

    let drilldowns = drilldown_years
        .into_iter()
        .map(|year| {
            (
                year,
                analysis::summarize_job_titles(&dataset.records, year),
            )
        })
        .collect();

    DashboardReport {
        metadata: ReportMetadata {
            dataset: config.dataset.path.clone(),
            generated_at: Utc::now(),
            records_loaded: dataset.records.len(),
            records_skipped: dataset.skipped,
        },
        years: years.to_vec(),
        drilldowns,
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .salaryboard.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
