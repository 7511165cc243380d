//! Dashboard report generation.
//!
//! This module renders the computed summaries three ways: fixed-width
//! text tables for stdout, a Markdown report, and a JSON report.

use crate::models::{DashboardReport, JobTitleSummary, ReportMetadata, YearSummary};
use anyhow::Result;

/// Render the yearly summary as a fixed-width text table.
pub fn render_year_table(summaries: &[YearSummary]) -> String {
    let mut table = String::new();

    table.push_str(&format!(
        "{:<6} {:>12} {:>14}\n",
        "Year", "Total Jobs", "Avg. USD"
    ));
    table.push_str(&format!("{:-<6} {:->12} {:->14}\n", "", "", ""));

    for summary in summaries {
        table.push_str(&format!(
            "{:<6} {:>12} {:>14.2}\n",
            summary.year, summary.total_jobs, summary.avg_salary_usd
        ));
    }

    if summaries.is_empty() {
        table.push_str("(no records)\n");
    }

    table
}

/// Render a drill-down as a fixed-width text table.
pub fn render_title_table(titles: &[JobTitleSummary], max_rows: usize) -> String {
    let mut table = String::new();

    table.push_str(&format!("{:<40} {:>12}\n", "Job Title", "Total Jobs"));
    table.push_str(&format!("{:-<40} {:->12}\n", "", ""));

    let shown = if max_rows == 0 { titles.len() } else { max_rows };
    for title in titles.iter().take(shown) {
        table.push_str(&format!(
            "{:<40} {:>12}\n",
            title.job_title, title.total_jobs
        ));
    }

    if titles.is_empty() {
        table.push_str("(no records for this year)\n");
    } else if titles.len() > shown {
        table.push_str(&format!("... and {} more titles\n", titles.len() - shown));
    }

    table
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &DashboardReport) -> String {
    let mut output = String::new();

    output.push_str("# Salaryboard Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_years_section(&report.years));

    for (year, titles) in &report.drilldowns {
        output.push_str(&generate_drilldown_section(*year, titles));
    }

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Dataset:** `{}`\n", metadata.dataset));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Records Loaded:** {}\n",
        metadata.records_loaded
    ));
    if metadata.records_skipped > 0 {
        section.push_str(&format!(
            "- **Records Skipped:** {}\n",
            metadata.records_skipped
        ));
    }
    section.push('\n');

    section
}

/// Generate the yearly summary section.
fn generate_years_section(years: &[YearSummary]) -> String {
    let mut section = String::new();

    section.push_str("## Jobs and Salaries by Year\n\n");

    if years.is_empty() {
        section.push_str("No records were loaded from the dataset.\n\n");
        return section;
    }

    section.push_str("| Year | Total Jobs | Avg. USD |\n");
    section.push_str("|:---|---:|---:|\n");

    for year in years {
        section.push_str(&format!(
            "| {} | {} | {:.2} |\n",
            year.year, year.total_jobs, year.avg_salary_usd
        ));
    }
    section.push('\n');

    section
}

/// Generate one drill-down section.
fn generate_drilldown_section(year: u16, titles: &[JobTitleSummary]) -> String {
    let mut section = String::new();

    section.push_str(&format!("## Job Titles for {}\n\n", year));

    if titles.is_empty() {
        section.push_str("No records for this year.\n\n");
        return section;
    }

    section.push_str("| Job Title | Total Jobs |\n");
    section.push_str("|:---|---:|\n");

    for title in titles {
        section.push_str(&format!("| {} | {} |\n", title.job_title, title.total_jobs));
    }
    section.push('\n');

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &DashboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
