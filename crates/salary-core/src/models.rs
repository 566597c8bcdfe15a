//! Core data models for the salary estimator

use serde::{Deserialize, Serialize};

/// Currency code reported alongside every prediction
pub const CURRENCY: &str = "USD";

/// One observed row of the historical salary dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub job_title: String,
    pub education_level: String,
    pub salary: f64,
    pub years_experience: f64,
}

/// Worker profile submitted for a salary estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub years_experience: f64,
    pub education_level: String,
    pub job_title: String,
}

/// Salary summary for a single job title
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JobStats {
    pub mean: f64,
    pub count: usize,
}

/// Estimate returned to the service layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_salary: f64,
    pub currency: String,
    #[serde(rename = "database_stats")]
    pub stats: JobStats,
}

/// Richer statistics used to ground the insight generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightSummary {
    pub count: usize,
    pub mean_salary: f64,
    pub max_salary: f64,
    pub mean_experience: f64,
}

/// Round to currency precision (2 decimal places)
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
