//! Shared read-only service state
//!
//! Built once at startup from the loaded artifacts and shared behind an
//! `Arc` by every request handler. Nothing here is mutated after
//! construction, so concurrent requests need no coordination.

use crate::error::CoreError;
use crate::history::{self, HistoricalStore};
use crate::models::{round_currency, JobStats, PredictionResponse, CURRENCY};
use crate::scoring::{self, LoadedModel, PredictionBreakdown, ScoringModel};

const MODEL_MISSING: &str = "model artifact not loaded";

/// Smallest representable positive amount after rounding to cents
const MIN_PREDICTION: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct SalaryService {
    model: Option<LoadedModel>,
    history: HistoricalStore,
}

impl SalaryService {
    pub fn new(model: Option<LoadedModel>, history: HistoricalStore) -> Self {
        Self { model, history }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Version of the loaded model, if any
    pub fn model_version(&self) -> Option<&str> {
        self.model.as_ref().map(LoadedModel::version)
    }

    pub fn history(&self) -> &HistoricalStore {
        &self.history
    }

    fn model(&self) -> Result<&ScoringModel, CoreError> {
        self.model
            .as_ref()
            .map(|loaded| &loaded.model)
            .ok_or_else(|| CoreError::ModelUnavailable(MODEL_MISSING.to_string()))
    }

    /// Offerable job titles in artifact order
    pub fn list_jobs(&self) -> Result<&[String], CoreError> {
        Ok(&self.model()?.job_list)
    }

    /// Estimate a salary and attach the historical stats for the job title
    pub fn predict(
        &self,
        years_experience: f64,
        education_level: &str,
        job_title: &str,
    ) -> Result<PredictionResponse, CoreError> {
        self.predict_detailed(years_experience, education_level, job_title)
            .map(|(response, _)| response)
    }

    /// Same as [`predict`](Self::predict), also returning the engine breakdown
    pub fn predict_detailed(
        &self,
        years_experience: f64,
        education_level: &str,
        job_title: &str,
    ) -> Result<(PredictionResponse, PredictionBreakdown), CoreError> {
        let model = self.model()?;

        if !years_experience.is_finite() || years_experience < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "years_experience must be a non-negative finite number, got {}",
                years_experience
            )));
        }

        let breakdown = scoring::explain(model, years_experience, education_level, job_title);
        let mut predicted_salary = round_currency(breakdown.value);
        if !predicted_salary.is_finite() {
            return Err(CoreError::InvalidInput(
                "prediction is outside the representable range".to_string(),
            ));
        }
        // A positive estimate never rounds down to zero
        if breakdown.value > 0.0 && predicted_salary <= 0.0 {
            predicted_salary = MIN_PREDICTION;
        }

        let stats = self.job_stats(job_title);
        let response = PredictionResponse {
            predicted_salary,
            currency: CURRENCY.to_string(),
            stats: JobStats {
                mean: round_currency(stats.mean),
                count: stats.count,
            },
        };
        Ok((response, breakdown))
    }

    /// Unrounded historical stats for a job title
    pub fn job_stats(&self, job_title: &str) -> JobStats {
        history::stats(self.history.records(), job_title)
    }

    /// Grounding text for the insight generator. Available without a model.
    pub fn build_insight_context(&self, job_title: &str) -> String {
        history::build_context(self.history.records(), job_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::NO_DATA_CONTEXT;
    use crate::scoring::parse_artifact;

    const ARTIFACT: &str = r#"{
        "intercept": 10.0,
        "coefficients": {"experience": 0.1, "education": 0.2, "job": 0.3},
        "mappings": {"education": {"PhD": 1}, "job": {"Engineer": 1}},
        "defaults": {"education": 0, "job": 0},
        "job_list": ["Engineer", "Analyst"],
        "transform": "log"
    }"#;

    const DATASET: &str = "\
Job Title,Education Level,Salary,Years of Experience
Engineer,PhD,100,4
Engineer,Master's,200,6
Analyst,Bachelor's,50000.556,2
";

    fn service() -> SalaryService {
        let model = parse_artifact(ARTIFACT.as_bytes()).unwrap();
        let history = HistoricalStore::from_reader(DATASET.as_bytes()).unwrap();
        SalaryService::new(Some(model), history)
    }

    fn service_without_model() -> SalaryService {
        let history = HistoricalStore::from_reader(DATASET.as_bytes()).unwrap();
        SalaryService::new(None, history)
    }

    #[test]
    fn test_list_jobs_in_artifact_order() {
        let svc = service();
        assert_eq!(svc.list_jobs().unwrap(), ["Engineer", "Analyst"]);
    }

    #[test]
    fn test_predict_rounds_at_boundary() {
        let svc = service();
        let response = svc.predict(5.0, "PhD", "Engineer").unwrap();

        assert_eq!(response.predicted_salary, 59874.14);
        assert_eq!(response.currency, "USD");
        assert_eq!(response.stats, JobStats { mean: 150.0, count: 2 });
    }

    #[test]
    fn test_predict_rounds_stats_mean() {
        let svc = service();
        let response = svc.predict(1.0, "Bachelor's", "Analyst").unwrap();
        assert_eq!(response.stats.count, 1);
        assert_eq!(response.stats.mean, 50000.56);
    }

    #[test]
    fn test_predict_unknown_job_has_empty_stats() {
        let svc = service();
        let response = svc.predict(2.0, "Diploma", "Astronaut").unwrap();
        assert_eq!(response.stats, JobStats { mean: 0.0, count: 0 });
        assert!(response.predicted_salary > 0.0);
    }

    #[test]
    fn test_model_unavailable() {
        let svc = service_without_model();
        assert!(!svc.is_model_loaded());
        assert!(svc.model_version().is_none());
        assert!(matches!(
            svc.predict(5.0, "PhD", "Engineer"),
            Err(CoreError::ModelUnavailable(_))
        ));
        assert!(matches!(svc.list_jobs(), Err(CoreError::ModelUnavailable(_))));
    }

    #[test]
    fn test_context_available_without_model() {
        let svc = service_without_model();
        assert!(svc
            .build_insight_context("Engineer")
            .starts_with("Database Data: Average Salary: $150"));
        assert_eq!(svc.build_insight_context("Astronaut"), NO_DATA_CONTEXT);
    }

    #[test]
    fn test_invalid_experience_rejected() {
        let svc = service();
        for years in [-1.0, f64::NAN, f64::INFINITY] {
            let err = svc.predict(years, "PhD", "Engineer").unwrap_err();
            assert_eq!(err.code(), "invalid_input", "years {}", years);
        }
    }

    fn log_service(intercept: f64) -> SalaryService {
        let artifact = format!(
            r#"{{"intercept": {}, "coefficients": {{}}, "mappings": {{}}, "transform": "log"}}"#,
            intercept
        );
        let model = parse_artifact(artifact.as_bytes()).unwrap();
        SalaryService::new(Some(model), HistoricalStore::empty())
    }

    #[test]
    fn test_saturated_log_prediction_rejected() {
        let err = log_service(1000.0)
            .predict(5.0, "PhD", "Engineer")
            .unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn test_tiny_log_prediction_stays_positive() {
        let response = log_service(-1000.0)
            .predict(5.0, "PhD", "Engineer")
            .unwrap();
        assert_eq!(response.predicted_salary, 0.01);
        assert!(serde_json::to_value(&response).unwrap()["predicted_salary"].is_f64());
    }

    #[test]
    fn test_predict_detailed_reports_fallbacks() {
        let svc = service();
        let (_, breakdown) = svc.predict_detailed(5.0, "Diploma", "Engineer").unwrap();
        assert!(!breakdown.education_known);
        assert!(breakdown.job_known);
    }
}
