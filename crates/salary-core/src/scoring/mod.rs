//! Scoring engine: categorical encoding and salary prediction

mod artifact;
mod encoder;
mod engine;
mod model;

pub use artifact::{load_artifact, parse_artifact, ArtifactError, LoadedModel};
pub use encoder::encode;
pub use engine::{apply_transform, explain, predict, PredictionBreakdown};
pub use model::{CategoryDefaults, Coefficients, Mappings, ScoringModel, Transform};
