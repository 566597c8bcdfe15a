//! Job title listing

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use crate::client::ApiClient;
use crate::output::{print_json, print_warning, OutputFormat};

/// Row for job titles table
#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Job Title")]
    title: String,
}

/// List the job titles the model was trained on
pub async fn list_jobs(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let jobs = client.jobs().await?;

    match format {
        OutputFormat::Json => print_json(&jobs)?,
        OutputFormat::Table => {
            if jobs.is_empty() {
                print_warning("The model lists no job titles");
                return Ok(());
            }

            let rows: Vec<JobRow> = jobs
                .into_iter()
                .enumerate()
                .map(|(i, title)| JobRow {
                    index: i + 1,
                    title,
                })
                .collect();

            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }

    Ok(())
}
