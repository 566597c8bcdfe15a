//! Retrieval context handed to the insight generator

use super::stats::summarize;
use crate::models::HistoricalRecord;

/// Context used when no record matches the job title
pub const NO_DATA_CONTEXT: &str = "No specific data found in database.";

/// Render a one-line summary of the historical records for `job_title`
pub fn build_context(records: &[HistoricalRecord], job_title: &str) -> String {
    match summarize(records, job_title) {
        None => NO_DATA_CONTEXT.to_string(),
        Some(summary) => format!(
            "Database Data: Average Salary: ${}, Max Salary: ${}, Avg Experience: {:.1} years.",
            format_currency(summary.mean_salary, 0),
            format_currency(summary.max_salary, 0),
            summary.mean_experience,
        ),
    }
}

/// Format `amount` with comma thousands separators and `decimals` fraction digits
pub fn format_currency(amount: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if amount.is_sign_negative() && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        grouped.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
