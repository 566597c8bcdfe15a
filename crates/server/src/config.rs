//! Server configuration

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

/// Server configuration, read from `SALARY_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Name reported in structured logs
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    /// HTTP listen port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Path of the JSON model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path of the historical salary CSV
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Browser origins allowed by CORS
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Gemini API key; insights are disabled without one
    #[serde(default = "default_gemini_api_key")]
    pub gemini_api_key: Option<String>,

    /// Base URL of the Gemini REST API
    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Upper bound for a single generator call in seconds
    #[serde(default = "default_generator_timeout")]
    pub generator_timeout_secs: u64,
}

fn default_instance_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string())
}

fn default_api_port() -> u16 {
    8000
}

fn default_model_path() -> String {
    "model_weights.json".to_string()
}

fn default_data_path() -> String {
    "Salary Data.csv".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_generator_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            instance_name: default_instance_name(),
            api_port: default_api_port(),
            model_path: default_model_path(),
            data_path: default_data_path(),
            cors_origins: default_cors_origins(),
            gemini_api_key: default_gemini_api_key(),
            gemini_endpoint: default_gemini_endpoint(),
            gemini_model: default_gemini_model(),
            generator_timeout_secs: default_generator_timeout(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SALARY")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?;

        let mut loaded: Self = config.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid SALARY_* configuration, using defaults");
            Self::default()
        });
        loaded.gemini_api_key = loaded.gemini_api_key.filter(|key| !key.trim().is_empty());
        Ok(loaded)
    }

    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator_timeout_secs)
    }
}
