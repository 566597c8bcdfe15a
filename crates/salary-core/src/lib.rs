//! Core library for the salary estimator
//!
//! This crate provides:
//! - Categorical encoding and salary prediction from a trained artifact
//! - Historical record loading and per-job statistics
//! - Retrieval context for the insight generator
//! - Health checks and observability

pub mod error;
pub mod health;
pub mod history;
pub mod models;
pub mod observability;
pub mod scoring;
pub mod service;

pub use error::CoreError;
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
pub use service::SalaryService;
