//! Data models for the salary dashboard.
//!
//! This module contains the record schema as it appears in the source
//! dataset, the parsed in-memory record, and the derived summary rows
//! the dashboard displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A salary record exactly as it appears in the source dataset.
///
/// Every field is text, including the numeric ones; the loader parses
/// them into a [`SalaryRecord`] and drops rows whose numeric fields do
/// not parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSalaryRecord {
    pub work_year: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub employment_type: String,
    pub job_title: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub salary_currency: String,
    pub salary_in_usd: String,
    #[serde(default)]
    pub employee_residence: String,
    #[serde(default)]
    pub remote_ratio: String,
    #[serde(default)]
    pub company_location: String,
    #[serde(default)]
    pub company_size: String,
}

/// A parsed salary record. Immutable for the lifetime of the process;
/// there is no write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Year the salary was observed.
    pub work_year: u16,
    /// Free-text job title.
    pub job_title: String,
    /// Salary normalized to US dollars.
    pub salary_in_usd: f64,
    /// Carried but unused by the aggregations.
    pub experience_level: String,
    pub employment_type: String,
    pub salary_currency: String,
    pub employee_residence: String,
    pub remote_ratio: String,
    pub company_location: String,
    pub company_size: String,
}

impl SalaryRecord {
    /// Convenience constructor for the fields the aggregations read.
    #[cfg(test)]
    pub fn sample(work_year: u16, job_title: &str, salary_in_usd: f64) -> Self {
        Self {
            work_year,
            job_title: job_title.to_string(),
            salary_in_usd,
            experience_level: String::new(),
            employment_type: String::new(),
            salary_currency: String::new(),
            employee_residence: String::new(),
            remote_ratio: String::new(),
            company_location: String::new(),
            company_size: String::new(),
        }
    }
}

/// One summary row per distinct year in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    /// The year this row partitions.
    pub year: u16,
    /// Number of records observed in the year.
    pub total_jobs: usize,
    /// Mean USD salary over the year's records, rounded to cents.
    pub avg_salary_usd: f64,
}

/// One drill-down row per distinct job title within a selected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTitleSummary {
    pub job_title: String,
    pub total_jobs: usize,
}

/// Metadata about a generated dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the dataset the report was computed from.
    pub dataset: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records that made it past the loader.
    pub records_loaded: usize,
    /// Number of rows the loader dropped as malformed.
    pub records_skipped: usize,
}

/// The complete dashboard report: yearly summaries plus optional
/// drill-downs for selected years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub metadata: ReportMetadata,
    pub years: Vec<YearSummary>,
    /// Drill-downs that were requested, keyed by year.
    pub drilldowns: Vec<(u16, Vec<JobTitleSummary>)>,
}

/// Round a value to two decimal places.
///
/// Uses `f64::round` semantics after scaling by 100, i.e. ties round
/// half away from zero. This is the pinned rounding rule for average
/// salaries; changing it changes the displayed and reported figures.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(123.456), 123.46);
        assert_eq!(round_to_cents(123.454), 123.45);
        assert_eq!(round_to_cents(90000.0), 90000.0);
    }

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        // 0.125 scales to an exact 12.5 in binary, so the tie is real.
        // Half-to-even would give 0.12.
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
    }

    #[test]
    fn test_raw_record_json_schema() {
        let json = r#"{
            "work_year": "2023",
            "experience_level": "SE",
            "employment_type": "FT",
            "job_title": "Data Engineer",
            "salary": "120000",
            "salary_currency": "USD",
            "salary_in_usd": "120000",
            "employee_residence": "US",
            "remote_ratio": "100",
            "company_location": "US",
            "company_size": "M"
        }"#;

        let raw: RawSalaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.work_year, "2023");
        assert_eq!(raw.job_title, "Data Engineer");
        assert_eq!(raw.salary_in_usd, "120000");
    }

    #[test]
    fn test_raw_record_missing_optional_fields() {
        // Only the fields the aggregations need are required.
        let json = r#"{
            "work_year": "2022",
            "job_title": "Analyst",
            "salary_in_usd": "90000"
        }"#;

        let raw: RawSalaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.work_year, "2022");
        assert!(raw.company_size.is_empty());
    }
}
