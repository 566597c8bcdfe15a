//! Model artifact loading
//!
//! Reads the JSON weights file produced at training time and fingerprints it
//! so the loaded version can be reported in logs and metrics.

use super::model::ScoringModel;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Number of hex characters of the checksum used as the model version
const VERSION_LEN: usize = 12;

/// Errors raised while loading a model artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A parsed artifact together with its fingerprint
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: ScoringModel,
    pub checksum: String,
}

impl LoadedModel {
    /// Short version string derived from the artifact checksum
    pub fn version(&self) -> &str {
        &self.checksum[..VERSION_LEN.min(self.checksum.len())]
    }
}

/// Load and parse the artifact at `path`
pub fn load_artifact(path: impl AsRef<Path>) -> Result<LoadedModel, ArtifactError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), size_bytes = bytes.len(), "Read model artifact");
    parse_artifact(&bytes)
}

/// Parse artifact bytes already in memory
pub fn parse_artifact(bytes: &[u8]) -> Result<LoadedModel, ArtifactError> {
    let model: ScoringModel = serde_json::from_slice(bytes)?;
    Ok(LoadedModel {
        model,
        checksum: compute_checksum(bytes),
    })
}

fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Transform;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ARTIFACT: &str = r#"{
        "intercept": 10.0,
        "coefficients": {"experience": 0.1, "education": 0.2, "job": 0.3},
        "mappings": {
            "education": {"Bachelor's": 0, "Master's": 1, "PhD": 2},
            "job": {"Data Scientist": 3, "Software Engineer": 4}
        },
        "defaults": {"education": 0, "job": 0},
        "job_list": ["Data Scientist", "Software Engineer"],
        "transform": "log",
        "experience_scale": 0.5
    }"#;

    #[test]
    fn test_load_artifact_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ARTIFACT.as_bytes()).unwrap();

        let loaded = load_artifact(file.path()).unwrap();
        assert_eq!(loaded.model.intercept, 10.0);
        assert_eq!(loaded.model.transform, Transform::Exp);
        assert_eq!(loaded.model.experience_scale, Some(0.5));
        assert_eq!(
            loaded.model.job_list,
            vec!["Data Scientist".to_string(), "Software Engineer".to_string()]
        );
        assert_eq!(loaded.model.mappings.education["PhD"], 2.0);
        assert_eq!(loaded.checksum.len(), 64);
        assert_eq!(loaded.version().len(), VERSION_LEN);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifact(dir.path().join("model_weights.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_artifact(b"{\"intercept\": ").unwrap_err();
        assert!(matches!(err, ArtifactError::Parse(_)));
    }

    #[test]
    fn test_checksum_is_stable() {
        let a = parse_artifact(ARTIFACT.as_bytes()).unwrap();
        let b = parse_artifact(ARTIFACT.as_bytes()).unwrap();
        assert_eq!(a.checksum, b.checksum);
        assert_eq!(a.model, b.model);
    }
}
