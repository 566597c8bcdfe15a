//! Salary prediction command

use anyhow::Result;
use colored::Colorize;

use crate::client::{ApiClient, PredictionRequest, PredictionResponse};
use crate::output::{format_currency, print_info, print_json, OutputFormat};

/// Request a salary estimate and print it next to the historical average
pub async fn predict(
    client: &ApiClient,
    experience: f64,
    education: &str,
    job: &str,
    format: OutputFormat,
) -> Result<()> {
    let request = PredictionRequest {
        years_experience: experience,
        education_level: education.to_string(),
        job_title: job.to_string(),
    };
    let result = client.predict(&request).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_prediction(&request, &result),
    }

    Ok(())
}

fn print_prediction(request: &PredictionRequest, result: &PredictionResponse) {
    println!("{}", "Salary Estimate".bold());
    println!("{}", "=".repeat(50));
    println!("Job Title:              {}", request.job_title.cyan());
    println!("Education:              {}", request.education_level);
    println!("Experience:             {} years", request.years_experience);
    println!();
    println!(
        "{} {}",
        "Predicted Salary:".bold(),
        format_currency(result.predicted_salary, &result.currency)
            .green()
            .bold()
    );

    let stats = &result.database_stats;
    if stats.count == 0 {
        print_info("No historical records for this job title");
        return;
    }

    println!();
    println!("{}", "Historical Data".bold());
    println!("{}", "-".repeat(50));
    println!(
        "Average Salary:         {}",
        format_currency(stats.mean, &result.currency)
    );
    println!("Records:                {}", stats.count);

    let diff = result.predicted_salary - stats.mean;
    let diff_str = format_currency(diff.abs(), &result.currency);
    if diff >= 0.0 {
        println!("Above Average By:       {}", diff_str.green());
    } else {
        println!("Below Average By:       {}", diff_str.yellow());
    }
}
