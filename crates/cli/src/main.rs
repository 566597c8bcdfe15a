//! Salary Estimator CLI
//!
//! A command-line tool for listing job titles, requesting salary estimates
//! and career insights, and checking the health of the salary service.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{health, insights, jobs, predict};

/// Salary Estimator CLI
#[derive(Parser)]
#[command(name = "salary")]
#[command(author, version, about = "CLI for the Salary Estimator service", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via SALARY_API_URL env var)
    #[arg(long, env = "SALARY_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the job titles known to the model
    Jobs,

    /// Estimate a salary
    Predict {
        /// Years of professional experience
        #[arg(long, short)]
        experience: f64,

        /// Education level (e.g. "Bachelor's", "Master's", "PhD")
        #[arg(long)]
        education: String,

        /// Job title
        #[arg(long, short)]
        job: String,
    },

    /// Get career insights grounded in historical salary data
    Insights {
        /// Job title
        #[arg(long, short)]
        job: String,

        /// Years of professional experience
        #[arg(long, short)]
        experience: f64,

        /// Predicted salary to discuss (requested from the service if omitted)
        #[arg(long, short)]
        salary: Option<f64>,

        /// Education level used to predict the salary when --salary is omitted
        #[arg(long, required_unless_present = "salary")]
        education: Option<String>,
    },

    /// Show service health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = client::ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Jobs => {
            jobs::list_jobs(&client, cli.format).await?;
        }
        Commands::Predict {
            experience,
            education,
            job,
        } => {
            predict::predict(&client, experience, &education, &job, cli.format).await?;
        }
        Commands::Insights {
            job,
            experience,
            salary,
            education,
        } => {
            insights::insights(
                &client,
                &job,
                experience,
                salary,
                education.as_deref(),
                cli.format,
            )
            .await?;
        }
        Commands::Health => {
            health::show_health(&client, cli.format).await?;
        }
    }

    Ok(())
}
