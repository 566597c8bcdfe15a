//! Career insight command

use anyhow::{Context, Result};
use colored::Colorize;

use crate::client::{ApiClient, InsightsRequest, PredictionRequest};
use crate::output::{format_currency, print_json, OutputFormat};

/// Ask the service for a grounded career insight.
///
/// When no salary is supplied, a prediction is requested first using the
/// given education level.
pub async fn insights(
    client: &ApiClient,
    job: &str,
    experience: f64,
    salary: Option<f64>,
    education: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let predicted_salary = match salary {
        Some(salary) => salary,
        None => {
            let education = education.context("--education is required without --salary")?;
            let request = PredictionRequest {
                years_experience: experience,
                education_level: education.to_string(),
                job_title: job.to_string(),
            };
            client.predict(&request).await?.predicted_salary
        }
    };

    let request = InsightsRequest {
        job_title: job.to_string(),
        predicted_salary,
        years_experience: experience,
    };
    let result = client.insights(&request).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!(
                "{} {} ({} years, {})",
                "Insights for".bold(),
                job.cyan(),
                experience,
                format_currency(predicted_salary, "USD")
            );
            println!("{}", "=".repeat(50));
            println!("{}", result.insights);
        }
    }

    Ok(())
}
