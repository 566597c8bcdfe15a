//! Service health command

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use crate::client::ApiClient;
use crate::output::{color_status, print_json, OutputFormat};

/// Row for component health table
#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Show overall and per-component health
pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let report = client.health().await?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            println!("Service status: {}", color_status(&report.status));

            let rows: Vec<ComponentRow> = report
                .components
                .into_iter()
                .map(|(name, component)| ComponentRow {
                    name,
                    status: color_status(&component.status),
                    message: component.message.unwrap_or_else(|| "-".to_string()),
                })
                .collect();

            if !rows.is_empty() {
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
    }

    Ok(())
}
