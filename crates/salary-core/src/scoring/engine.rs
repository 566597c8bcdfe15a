//! Salary prediction from a scoring model
//!
//! Encodes the categorical inputs, forms the weighted sum and applies the
//! model's transform. Pure and total over finite inputs: unknown labels fall
//! back to the model defaults and nothing here fails.

use super::encoder::encode;
use super::model::{ScoringModel, Transform};

/// Intermediate values of a single prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionBreakdown {
    pub education_score: f64,
    pub job_score: f64,
    pub education_known: bool,
    pub job_known: bool,
    pub linear_value: f64,
    pub value: f64,
}

/// Predict a salary. Unrounded; currency rounding belongs to the caller.
pub fn predict(
    model: &ScoringModel,
    years_experience: f64,
    education_level: &str,
    job_title: &str,
) -> f64 {
    explain(model, years_experience, education_level, job_title).value
}

/// Same computation as [`predict`], keeping the intermediate scores
pub fn explain(
    model: &ScoringModel,
    years_experience: f64,
    education_level: &str,
    job_title: &str,
) -> PredictionBreakdown {
    let education_score = encode(
        &model.mappings.education,
        model.defaults.education,
        education_level,
    );
    let job_score = encode(&model.mappings.job, model.defaults.job, job_title);

    let weights = &model.coefficients;
    let linear_value = model.intercept
        + years_experience * model.experience_multiplier() * weights.experience
        + education_score * weights.education
        + job_score * weights.job;

    PredictionBreakdown {
        education_score,
        job_score,
        education_known: model.knows_education(education_level),
        job_known: model.knows_job(job_title),
        linear_value,
        value: apply_transform(model.transform, linear_value),
    }
}

/// Map the weighted sum onto the salary scale.
///
/// `Exp` results are kept inside `[f64::MIN_POSITIVE, f64::MAX]` so a log-linear
/// model never yields zero or infinity.
pub fn apply_transform(transform: Transform, linear_value: f64) -> f64 {
    match transform {
        Transform::Identity => linear_value,
        Transform::Exp => linear_value.exp().clamp(f64::MIN_POSITIVE, f64::MAX),
    }
}
