//! Historical records and the statistics derived from them

mod context;
mod stats;
mod store;

pub use context::{build_context, format_currency, NO_DATA_CONTEXT};
pub use stats::{stats, summarize};
pub use store::{
    HistoricalStore, HistoryError, EDUCATION_COLUMN, EXPERIENCE_COLUMN, JOB_TITLE_COLUMN,
    SALARY_COLUMN,
};
