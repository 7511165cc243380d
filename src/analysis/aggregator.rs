//! Yearly and per-year aggregation.
//!
//! This module implements the two computations behind the dashboard:
//! the per-year summary table and the job-title drill-down for one
//! selected year. Both are single-pass grouping over the full record
//! slice and are recomputed from scratch on every call.

use crate::models::{round_to_cents, JobTitleSummary, SalaryRecord, YearSummary};
use std::collections::HashMap;

/// Summarize the dataset by year.
///
/// Produces one [`YearSummary`] per distinct `work_year` present in the
/// input; years absent from the input get no row (no zero-filling).
/// The rows partition the input exactly: the `total_jobs` counts sum to
/// the input length. Results are sorted by year for stable display.
pub fn summarize_by_year(records: &[SalaryRecord]) -> Vec<YearSummary> {
    let mut buckets: HashMap<u16, (usize, f64)> = HashMap::new();

    for record in records {
        let bucket = buckets.entry(record.work_year).or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += record.salary_in_usd;
    }

    let mut summaries: Vec<YearSummary> = buckets
        .into_iter()
        .map(|(year, (count, sum))| YearSummary {
            year,
            total_jobs: count,
            avg_salary_usd: round_to_cents(sum / count as f64),
        })
        .collect();

    summaries.sort_by_key(|s| s.year);
    summaries
}

/// Summarize job titles within one year.
///
/// Filters the input to records whose `work_year` equals `year`, then
/// groups and counts by exact, case-sensitive title equality. A year
/// with no matching records yields an empty result, not an error.
/// Results are sorted by count (descending), then title, for stable
/// display.
pub fn summarize_job_titles(records: &[SalaryRecord], year: u16) -> Vec<JobTitleSummary> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.work_year == year) {
        *counts.entry(record.job_title.as_str()).or_default() += 1;
    }

    let mut summaries: Vec<JobTitleSummary> = counts
        .into_iter()
        .map(|(job_title, total_jobs)| JobTitleSummary {
            job_title: job_title.to_string(),
            total_jobs,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.total_jobs
            .cmp(&a.total_jobs)
            .then_with(|| a.job_title.cmp(&b.job_title))
    });
    summaries
}

/// Distinct years present in the dataset, ascending.
pub fn distinct_years(records: &[SalaryRecord]) -> Vec<u16> {
    let mut years: Vec<u16> = records.iter().map(|r| r.work_year).collect();
    years.sort_unstable();
    years.dedup();
    years
}
