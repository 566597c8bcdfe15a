//! Salary Server - salary estimation service
//!
//! Loads the model artifact and historical dataset once, then serves
//! predictions, grounded career insights, health probes and metrics.

use anyhow::Result;
use salary_core::{HealthRegistry, ServiceMetrics, StructuredLogger};
use salary_server::{api, config::ServerConfig, startup};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting salary-server");

    let config = ServerConfig::load()?;
    info!(
        model_path = %config.model_path,
        data_path = %config.data_path,
        insights_enabled = config.gemini_api_key.is_some(),
        "Server configured"
    );

    let health_registry = HealthRegistry::new();
    let metrics = ServiceMetrics::new();
    let logger = StructuredLogger::new(&config.instance_name);

    let service = startup::load_service(&config, &health_registry, &metrics, &logger).await;
    info!(
        model_version = service.model_version().unwrap_or("none"),
        history_records = service.history().len(),
        "Service state initialized"
    );
    let generator = startup::build_generator(&config, &health_registry).await?;

    let mut state = api::AppState::new(service, health_registry.clone(), metrics, logger.clone());
    if let Some(generator) = generator {
        state = state.with_generator(generator, config.generator_timeout());
    }
    let router = api::create_router(Arc::new(state), api::cors_layer(&config.cors_origins));

    health_registry.set_ready(true).await;
    logger.log_startup(SERVICE_VERSION, config.api_port);

    tokio::select! {
        result = api::serve(config.api_port, router) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            logger.log_shutdown("SIGINT received");
        }
    }

    info!("Shutting down");
    Ok(())
}
