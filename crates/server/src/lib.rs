//! Salary estimator HTTP service
//!
//! Wires the scoring core to an axum router, the insight generator and the
//! startup artifact loading.

pub mod api;
pub mod config;
pub mod generator;
pub mod startup;
