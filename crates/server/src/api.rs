//! HTTP API: predictions, insights, health checks and Prometheus metrics

use crate::generator::{self, InsightGenerator, NO_API_KEY_MESSAGE};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use salary_core::{
    health::{components, ComponentStatus, HealthRegistry},
    CoreError, PredictionRequest, SalaryService, ServiceMetrics, StructuredLogger,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SalaryService>,
    pub health_registry: HealthRegistry,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
    pub generator: Option<Arc<dyn InsightGenerator>>,
    pub generator_timeout: Duration,
}

impl AppState {
    pub fn new(
        service: SalaryService,
        health_registry: HealthRegistry,
        metrics: ServiceMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            service: Arc::new(service),
            health_registry,
            metrics,
            logger,
            generator: None,
            generator_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn InsightGenerator>, timeout: Duration) -> Self {
        self.generator = Some(generator);
        self.generator_timeout = timeout;
        self
    }
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Maps core errors onto HTTP responses
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CoreError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            CoreError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
            code: self.0.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsRequest {
    pub job_title: String,
    pub predicted_salary: f64,
    pub years_experience: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub insights: String,
}

async fn list_jobs(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let jobs = state.service.list_jobs()?;
    Ok(Json(jobs.to_vec()))
}

async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let start = Instant::now();
    let result =
        state
            .service
            .predict_detailed(req.years_experience, &req.education_level, &req.job_title);
    state
        .metrics
        .observe_prediction_latency(start.elapsed().as_secs_f64());

    let (response, breakdown) = result.map_err(|err| {
        state.metrics.inc_prediction_errors(err.code());
        err
    })?;

    state.metrics.inc_predictions();
    if !breakdown.education_known {
        state.metrics.inc_category_fallback("education");
    }
    if !breakdown.job_known {
        state.metrics.inc_category_fallback("job");
    }
    state.logger.log_prediction(
        &req.job_title,
        &req.education_level,
        req.years_experience,
        response.predicted_salary,
        breakdown.education_known,
        breakdown.job_known,
        response.stats.count,
    );

    Ok(Json(response))
}

/// Answers 200 for every well-formed body; generator problems become the
/// insights text
async fn rag_insights(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let Json(req) = payload?;
    state.metrics.inc_insight_requests();

    let Some(generator) = state.generator.as_deref() else {
        return Ok(Json(InsightsResponse {
            insights: NO_API_KEY_MESSAGE.to_string(),
        }));
    };

    let context = state.service.build_insight_context(&req.job_title);
    let prompt = generator::render_prompt(
        &req.job_title,
        req.years_experience,
        req.predicted_salary,
        &context,
    );

    let start = Instant::now();
    let outcome = generator::generate_with_timeout(generator, &prompt, state.generator_timeout).await;
    state
        .metrics
        .observe_generator_latency(start.elapsed().as_secs_f64());

    let insights = match outcome {
        Ok(text) => {
            state.health_registry.set_healthy(components::GENERATOR).await;
            text
        }
        Err(err) => {
            state.metrics.inc_generator_failures();
            state.logger.log_generator_failure(&req.job_title, &err.to_string());
            state
                .health_registry
                .set_degraded(components::GENERATOR, err.to_string())
                .await;
            err.user_message()
        }
    };

    Ok(Json(InsightsResponse { insights }))
}

/// Health check response - returns 200 if healthy, 503 if degraded/unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still serving predictions
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!(error = %e, "Failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// CORS policy for the browser front-end. Invalid origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the API router
pub fn create_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/jobs", get(list_jobs))
        .route("/predict", post(predict))
        .route("/rag-insights", post(rag_insights));

    Router::new()
        .nest("/api", api)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, router: Router) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
