//! Output formatting utilities

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Pretty-print any response as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format currency with thousands separators
pub fn format_currency(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match currency {
        "USD" => format!("{}${}.{}", sign, grouped, cents),
        "EUR" => format!("{}€{}.{}", sign, grouped, cents),
        "GBP" => format!("{}£{}.{}", sign, grouped, cents),
        _ => format!("{}{}.{} {}", sign, grouped, cents, currency),
    }
}

/// Color status based on value
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "healthy" => status.green().to_string(),
        "degraded" => status.yellow().to_string(),
        "unhealthy" => status.red().to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(59874.14, "USD"), "$59,874.14");
        assert_eq!(format_currency(1234567.0, "USD"), "$1,234,567.00");
        assert_eq!(format_currency(999.5, "EUR"), "€999.50");
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
    }

    #[test]
    fn test_format_currency_unknown_code() {
        assert_eq!(format_currency(1500.0, "CHF"), "1,500.00 CHF");
        assert_eq!(format_currency(-1500.0, "USD"), "-$1,500.00");
    }
}
