//! Historical salary records loaded from the CSV dataset

use crate::models::HistoricalRecord;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const JOB_TITLE_COLUMN: &str = "Job Title";
pub const EDUCATION_COLUMN: &str = "Education Level";
pub const SALARY_COLUMN: &str = "Salary";
pub const EXPERIENCE_COLUMN: &str = "Years of Experience";

/// Errors raised while loading the dataset
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to open dataset {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read dataset header: {0}")]
    Header(#[source] csv::Error),

    #[error("dataset is missing required column {0:?}")]
    MissingColumn(&'static str),
}

/// Column positions of the required fields
struct ColumnIndex {
    job_title: usize,
    education_level: usize,
    salary: usize,
    years_experience: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, HistoryError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(HistoryError::MissingColumn(name))
        };
        Ok(Self {
            job_title: find(JOB_TITLE_COLUMN)?,
            education_level: find(EDUCATION_COLUMN)?,
            salary: find(SALARY_COLUMN)?,
            years_experience: find(EXPERIENCE_COLUMN)?,
        })
    }

    fn parse(&self, row: &csv::StringRecord) -> Option<HistoricalRecord> {
        let salary = parse_number(row.get(self.salary)?)?;
        let years_experience = parse_number(row.get(self.years_experience)?)?;
        if salary <= 0.0 || years_experience < 0.0 {
            return None;
        }
        Some(HistoricalRecord {
            job_title: row.get(self.job_title)?.to_string(),
            education_level: row.get(self.education_level)?.to_string(),
            salary,
            years_experience,
        })
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Immutable set of observed records
#[derive(Debug, Clone, Default)]
pub struct HistoricalStore {
    records: Vec<HistoricalRecord>,
}

impl HistoricalStore {
    pub fn new(records: Vec<HistoricalRecord>) -> Self {
        Self { records }
    }

    /// An empty store, used when the dataset cannot be loaded
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the dataset from a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| HistoryError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_csv(reader)
    }

    /// Load the dataset from any CSV byte stream
    pub fn from_reader<R: Read>(input: R) -> Result<Self, HistoryError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, HistoryError> {
        let headers = reader.headers().map_err(HistoryError::Header)?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for row in reader.records() {
            match row.ok().and_then(|row| columns.parse(&row)) {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }

        debug!(loaded = records.len(), dropped, "Parsed historical dataset");
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
