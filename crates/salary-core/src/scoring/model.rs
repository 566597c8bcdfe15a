//! Scoring model artifact value

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the weighted sum maps to a salary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// The weighted sum is the salary
    #[default]
    Identity,
    /// The weighted sum is a log-salary
    #[serde(rename = "log", alias = "exp")]
    Exp,
}

impl Transform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::Exp => "log",
        }
    }
}

/// Per-feature weights. Missing keys weigh zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    #[serde(default)]
    pub experience: f64,
    #[serde(default)]
    pub education: f64,
    #[serde(default)]
    pub job: f64,
}

/// Category-to-score tables built at training time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mappings {
    #[serde(default)]
    pub education: HashMap<String, f64>,
    #[serde(default)]
    pub job: HashMap<String, f64>,
}

/// Fallback scores for labels absent from [`Mappings`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryDefaults {
    #[serde(default)]
    pub education: f64,
    #[serde(default)]
    pub job: f64,
}

/// Immutable trained model, loaded once at startup.
///
/// Deserializes directly from the JSON artifact. Only `intercept` and
/// `coefficients` must be present; every other field falls back to its
/// neutral value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringModel {
    pub intercept: f64,
    pub coefficients: Coefficients,
    #[serde(default)]
    pub mappings: Mappings,
    #[serde(default)]
    pub defaults: CategoryDefaults,
    #[serde(default)]
    pub job_list: Vec<String>,
    #[serde(default)]
    pub transform: Transform,
    /// Multiplier on the experience term, 1 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_scale: Option<f64>,
}

impl ScoringModel {
    pub fn experience_multiplier(&self) -> f64 {
        self.experience_scale.unwrap_or(1.0)
    }

    pub fn knows_education(&self, label: &str) -> bool {
        self.mappings.education.contains_key(label)
    }

    pub fn knows_job(&self, label: &str) -> bool {
        self.mappings.job.contains_key(label)
    }
}
