//! Insight generator client
//!
//! Sends the grounded prompt to the Gemini `generateContent` REST endpoint.
//! Failures never reach the prediction path: callers turn every
//! [`GeneratorError`] into a user-visible message.

use async_trait::async_trait;
use reqwest::Client;
use salary_core::history::format_currency;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Reply when no API key is configured
pub const NO_API_KEY_MESSAGE: &str = "API Key not configured.";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The API answered without any generated text
    #[error("no candidates returned: {0}")]
    NoCandidates(String),
}

impl GeneratorError {
    /// Informational text shown to the user in place of insights
    pub fn user_message(&self) -> String {
        match self {
            GeneratorError::NoCandidates(reason) => {
                format!("AI could not generate a response. ({})", reason)
            }
            other => format!("Error calling Gemini: {}", other),
        }
    }
}

/// External text generator used by the insights flow
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, GeneratorError> {
        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);

        text.ok_or_else(|| {
            let reason = self
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            GeneratorError::NoCandidates(reason)
        })
    }
}

/// Gemini REST client
pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeneratorError> {
        let client = Client::builder().timeout(timeout).build()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        );
        Ok(Self {
            client,
            url,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl InsightGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        debug!(status = %response.status(), "Generator responded");
        let reply: GenerateResponse = response.json().await?;
        reply.into_text()
    }
}

/// Run a generator call bounded by `timeout`
pub async fn generate_with_timeout(
    generator: &dyn InsightGenerator,
    prompt: &str,
    timeout: Duration,
) -> Result<String, GeneratorError> {
    match tokio::time::timeout(timeout, generator.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(GeneratorError::Timeout(timeout)),
    }
}

/// Fixed prompt template for the career insights flow
pub fn render_prompt(
    job_title: &str,
    years_experience: f64,
    predicted_salary: f64,
    context: &str,
) -> String {
    format!(
        "You are a career counselor.\n\
         User Profile: {job_title} with {years_experience:?} years experience.\n\
         Predicted Salary: ${salary}.\n\
         \n\
         Context from our real Salary Database: {context}\n\
         \n\
         Task:\n\
         1. Analyze if their predicted salary is fair based on the database context.\n\
         2. Suggest 3 specific skills they should learn to increase their salary.\n\
         3. Keep it encouraging but realistic.\n",
        salary = format_currency(predicted_salary, 2),
    )
}
