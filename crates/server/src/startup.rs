//! One-time initialization of the shared service state
//!
//! Load failures are reported through logs, metrics and the health registry
//! but never abort startup: a missing model only disables predictions and a
//! missing dataset only empties the statistics.

use crate::config::ServerConfig;
use crate::generator::{GeminiClient, InsightGenerator};
use salary_core::health::{components, HealthRegistry};
use salary_core::history::HistoricalStore;
use salary_core::scoring::{self, LoadedModel};
use salary_core::{SalaryService, ServiceMetrics, StructuredLogger};
use std::sync::Arc;

/// Load the model artifact and historical dataset named in `config`
pub async fn load_service(
    config: &ServerConfig,
    health: &HealthRegistry,
    metrics: &ServiceMetrics,
    logger: &StructuredLogger,
) -> SalaryService {
    health.register(components::MODEL).await;
    health.register(components::HISTORY).await;

    let model = match scoring::load_artifact(&config.model_path) {
        Ok(loaded) => {
            report_model(&config.model_path, &loaded, metrics, logger);
            Some(loaded)
        }
        Err(e) => {
            logger.log_artifact_unavailable(&config.model_path, &e.to_string());
            health.set_unhealthy(components::MODEL, e.to_string()).await;
            None
        }
    };

    let history = match HistoricalStore::from_path(&config.data_path) {
        Ok(store) => {
            logger.log_history_loaded(&config.data_path, store.len());
            if store.is_empty() {
                health
                    .set_degraded(components::HISTORY, "Dataset contains no usable rows")
                    .await;
            }
            store
        }
        Err(e) => {
            logger.log_history_unavailable(&config.data_path, &e.to_string());
            health.set_degraded(components::HISTORY, e.to_string()).await;
            HistoricalStore::empty()
        }
    };
    metrics.set_history_records(history.len());

    SalaryService::new(model, history)
}

fn report_model(path: &str, loaded: &LoadedModel, metrics: &ServiceMetrics, logger: &StructuredLogger) {
    let transform = loaded.model.transform.as_str();
    logger.log_artifact_loaded(path, loaded.version(), transform, loaded.model.job_list.len());
    metrics.set_model_info(loaded.version(), transform);
}

/// Build the generator client when an API key is configured
pub async fn build_generator(
    config: &ServerConfig,
    health: &HealthRegistry,
) -> anyhow::Result<Option<Arc<dyn InsightGenerator>>> {
    health.register(components::GENERATOR).await;

    let Some(api_key) = config.gemini_api_key.as_deref() else {
        health
            .set_degraded(components::GENERATOR, "API key not configured")
            .await;
        return Ok(None);
    };

    let client = GeminiClient::new(
        &config.gemini_endpoint,
        &config.gemini_model,
        api_key,
        config.generator_timeout(),
    )?;
    Ok(Some(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use salary_core::ComponentStatus;
    use std::io::Write;
    use tempfile::TempDir;

    const ARTIFACT: &str = r#"{
        "intercept": 30000.0,
        "coefficients": {"experience": 2500.0, "education": 8000.0, "job": 1000.0},
        "mappings": {"education": {"Bachelor's": 0, "Master's": 1, "PhD": 2}, "job": {"Data Analyst": 5}},
        "defaults": {"education": 0, "job": 0},
        "job_list": ["Data Analyst"]
    }"#;

    const DATASET: &str = "\
Job Title,Education Level,Salary,Years of Experience
Data Analyst,Bachelor's,60000,2
";

    fn config_in(dir: &TempDir, with_model: bool, with_data: bool) -> ServerConfig {
        let model_path = dir.path().join("model_weights.json");
        let data_path = dir.path().join("Salary Data.csv");
        if with_model {
            std::fs::File::create(&model_path)
                .unwrap()
                .write_all(ARTIFACT.as_bytes())
                .unwrap();
        }
        if with_data {
            std::fs::File::create(&data_path)
                .unwrap()
                .write_all(DATASET.as_bytes())
                .unwrap();
        }
        ServerConfig {
            model_path: model_path.to_string_lossy().into_owned(),
            data_path: data_path.to_string_lossy().into_owned(),
            gemini_api_key: None,
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_load_service_with_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, true, true);
        let health = HealthRegistry::new();

        let service = load_service(
            &config,
            &health,
            &ServiceMetrics::new(),
            &StructuredLogger::new("test"),
        )
        .await;

        assert!(service.is_model_loaded());
        assert_eq!(service.model_version().map(str::len), Some(12));
        assert_eq!(service.history().len(), 1);
        assert_eq!(health.health().await.status, ComponentStatus::Healthy);
    }

    #[tokio::test]
    async fn test_missing_model_marks_unhealthy() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, false, true);
        let health = HealthRegistry::new();

        let service = load_service(
            &config,
            &health,
            &ServiceMetrics::new(),
            &StructuredLogger::new("test"),
        )
        .await;

        assert!(!service.is_model_loaded());
        assert_eq!(
            health.status_of(components::MODEL).await,
            Some(ComponentStatus::Unhealthy)
        );
    }

    #[tokio::test]
    async fn test_missing_dataset_degrades() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, true, false);
        let health = HealthRegistry::new();

        let service = load_service(
            &config,
            &health,
            &ServiceMetrics::new(),
            &StructuredLogger::new("test"),
        )
        .await;

        assert!(service.is_model_loaded());
        assert!(service.history().is_empty());
        assert_eq!(
            health.status_of(components::HISTORY).await,
            Some(ComponentStatus::Degraded)
        );
    }

    #[tokio::test]
    async fn test_no_api_key_means_no_generator() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, false, false);
        let health = HealthRegistry::new();

        let generator = build_generator(&config, &health).await.unwrap();
        assert!(generator.is_none());
        assert_eq!(
            health.status_of(components::GENERATOR).await,
            Some(ComponentStatus::Degraded)
        );
    }

    #[tokio::test]
    async fn test_api_key_builds_generator() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig {
            gemini_api_key: Some("key".to_string()),
            ..config_in(&dir, false, false)
        };
        let health = HealthRegistry::new();

        assert!(build_generator(&config, &health).await.unwrap().is_some());
    }
}
