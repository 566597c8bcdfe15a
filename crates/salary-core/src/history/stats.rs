//! Per-job aggregation over historical records

use crate::models::{HistoricalRecord, InsightSummary, JobStats};

fn matching<'a>(
    records: &'a [HistoricalRecord],
    job_title: &'a str,
) -> impl Iterator<Item = &'a HistoricalRecord> + 'a {
    records.iter().filter(move |r| r.job_title == job_title)
}

/// Mean salary and match count for `job_title`.
///
/// No matches is a normal result: `{mean: 0.0, count: 0}`.
pub fn stats(records: &[HistoricalRecord], job_title: &str) -> JobStats {
    let (count, total) = matching(records, job_title)
        .fold((0usize, 0.0f64), |(count, total), r| (count + 1, total + r.salary));

    if count == 0 {
        return JobStats::default();
    }
    JobStats {
        mean: total / count as f64,
        count,
    }
}

/// Mean salary, max salary and mean experience for `job_title`, if any record matches
pub fn summarize(records: &[HistoricalRecord], job_title: &str) -> Option<InsightSummary> {
    let mut count = 0usize;
    let mut salary_total = 0.0;
    let mut experience_total = 0.0;
    let mut max_salary = f64::MIN;

    for record in matching(records, job_title) {
        count += 1;
        salary_total += record.salary;
        experience_total += record.years_experience;
        max_salary = max_salary.max(record.salary);
    }

    if count == 0 {
        return None;
    }
    Some(InsightSummary {
        count,
        mean_salary: salary_total / count as f64,
        max_salary,
        mean_experience: experience_total / count as f64,
    })
}
