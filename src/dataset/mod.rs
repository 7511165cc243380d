//! Dataset loading.
//!
//! The dashboard works over a fixed collection of salary records loaded
//! once at startup from a JSON or CSV file. Rows whose numeric fields do
//! not parse are dropped entirely: they contribute to neither the count
//! nor the sum of any summary. Each dropped row is logged and counted so
//! the user can see how much of the file was unusable.

use crate::models::{RawSalaryRecord, SalaryRecord};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from reading and parsing a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported dataset format: {0} (expected .json or .csv)")]
    UnsupportedFormat(String),
}

/// Result of loading a dataset.
#[derive(Debug)]
pub struct Dataset {
    /// Records that parsed cleanly, in file order.
    pub records: Vec<SalaryRecord>,
    /// Rows dropped because a numeric field did not parse.
    pub skipped: usize,
}

/// Load a dataset file, dispatching on the file extension.
pub fn load(path: &Path) -> Result<Dataset, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
    };

    let total = raw.len();
    let mut records = Vec::with_capacity(total);

    for (index, raw_record) in raw.into_iter().enumerate() {
        match parse_record(raw_record) {
            Some(record) => records.push(record),
            None => warn!("Dropping row {}: unparsable numeric field", index + 1),
        }
    }

    let skipped = total - records.len();
    debug!("Loaded {} records ({} skipped)", records.len(), skipped);

    Ok(Dataset { records, skipped })
}

fn load_json(path: &Path) -> Result<Vec<RawSalaryRecord>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(serde_json::from_str(&content)?)
}

fn load_csv(path: &Path) -> Result<Vec<RawSalaryRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for row in reader.deserialize() {
        rows.push(row?);
    }

    Ok(rows)
}

/// Parse one raw row. Returns `None` when `work_year` or `salary_in_usd`
/// is not a finite number; such rows are excluded from both count and
/// sum of every summary.
fn parse_record(raw: RawSalaryRecord) -> Option<SalaryRecord> {
    let work_year: u16 = raw.work_year.trim().parse().ok()?;
    let salary_in_usd: f64 = raw.salary_in_usd.trim().parse().ok()?;

    if !salary_in_usd.is_finite() {
        return None;
    }

    Some(SalaryRecord {
        work_year,
        job_title: raw.job_title,
        salary_in_usd,
        experience_level: raw.experience_level,
        employment_type: raw.employment_type,
        salary_currency: raw.salary_currency,
        employee_residence: raw.employee_residence,
        remote_ratio: raw.remote_ratio,
        company_location: raw.company_location,
        company_size: raw.company_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "salaries.json",
            r#"[
                {"work_year": "2021", "job_title": "Engineer", "salary_in_usd": "100000"},
                {"work_year": "2022", "job_title": "Analyst", "salary_in_usd": "90000"}
            ]"#,
        );

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.skipped, 0);
        assert_eq!(dataset.records[0].work_year, 2021);
        assert_eq!(dataset.records[0].salary_in_usd, 100_000.0);
    }

    #[test]
    fn test_load_csv_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "salaries.csv",
            "work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size\n\
             2023,SE,FT,Data Engineer,120000,USD,120000,US,100,US,M\n\
             2023,MI,FT,Data Analyst,80000,USD,80000,GB,0,GB,L\n",
        );

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[1].job_title, "Data Analyst");
        assert_eq!(dataset.records[1].work_year, 2023);
    }

    #[test]
    fn test_malformed_rows_are_dropped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "salaries.json",
            r#"[
                {"work_year": "2021", "job_title": "Engineer", "salary_in_usd": "100000"},
                {"work_year": "2021", "job_title": "Engineer", "salary_in_usd": "not a number"},
                {"work_year": "twenty-one", "job_title": "Analyst", "salary_in_usd": "90000"}
            ]"#,
        );

        let dataset = load(&path).unwrap();
        // The malformed rows contribute to neither count nor sum.
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.skipped, 2);

        let summaries = crate::analysis::summarize_by_year(&dataset.records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_jobs, 1);
        assert_eq!(summaries[0].avg_salary_usd, 100_000.0);
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "salaries.json", "[]");

        let dataset = load(&path).unwrap();
        assert!(dataset.records.is_empty());
        assert_eq!(dataset.skipped, 0);
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "salaries.xml", "<records/>");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load(Path::new("/nonexistent/salaries.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
