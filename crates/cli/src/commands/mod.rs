pub mod health;
pub mod insights;
pub mod jobs;
pub mod predict;
