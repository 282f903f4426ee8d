//! Classifier adapter: loads the pre-trained diabetes model once and
//! exposes `predict` / `predict_probability` over the fixed feature vector.
//!
//! The artifact is opaque to the rest of the crate. Backends:
//! - `.json` — portable scikit-learn export (`artifact.rs`), always available
//! - `.onnx` — ONNX Runtime session, behind the `onnx` feature

pub mod artifact;
mod onnx;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::models::Prediction;

pub use artifact::JsonClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 8;

/// Model input order. Artifacts must be trained on exactly this layout.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "smoking_history",
    "bmi",
    "hba1c",
    "glucose",
];

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model not found. Please ensure {} exists.", .0.display())]
    ModelNotFound(PathBuf),
    #[error("Failed to read model {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Model integrity check failed: expected SHA-256 {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),
    #[error("Model initialization failed: {0}")]
    ModelInit(String),
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Pre-trained binary classifier over the eight patient features.
///
/// Implementations are immutable after construction and shared across
/// request handlers, hence `Send + Sync`.
pub trait Classifier: Send + Sync {
    /// Class probabilities `[p_no_diabetes, p_diabetes]`, summing to ~1.
    fn predict_probability(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], ClassifierError>;

    /// Most probable class. Ties go to the negative class.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<Prediction, ClassifierError> {
        let [p0, p1] = self.predict_probability(features)?;
        Ok(if p1 > p0 {
            Prediction::Diabetes
        } else {
            Prediction::NoDiabetes
        })
    }

    /// Short model family description for logs.
    fn kind(&self) -> String;
}

/// Provenance of the loaded artifact.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the artifact bytes.
    pub sha256: String,
    pub kind: String,
    /// Free-form name embedded in the artifact, if any.
    pub name: Option<String>,
}

/// A successfully loaded classifier plus its provenance.
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub info: ModelInfo,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel").field("info", &self.info).finish()
    }
}

/// Load a classifier artifact from disk.
///
/// When `expected_sha256` is given, the artifact is refused unless its
/// digest matches.
pub fn load_classifier(
    path: &Path,
    expected_sha256: Option<&str>,
) -> Result<LoadedModel, ClassifierError> {
    if !path.is_file() {
        return Err(ClassifierError::ModelNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let sha256 = sha256_hex(&bytes);
    if let Some(expected) = expected_sha256 {
        if !expected.eq_ignore_ascii_case(&sha256) {
            return Err(ClassifierError::DigestMismatch {
                expected: expected.to_ascii_lowercase(),
                actual: sha256,
            });
        }
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let (classifier, name): (Arc<dyn Classifier>, Option<String>) = match extension.as_str() {
        "json" => {
            let json = JsonClassifier::from_slice(&bytes)?;
            let name = json.name().map(str::to_string);
            (Arc::new(json), name)
        }
        #[cfg(feature = "onnx")]
        "onnx" => (Arc::new(OnnxClassifier::from_memory(&bytes)?), None),
        #[cfg(not(feature = "onnx"))]
        "onnx" => {
            return Err(ClassifierError::UnsupportedFormat(
                "ONNX models require the `onnx` feature".into(),
            ))
        }
        other => {
            return Err(ClassifierError::UnsupportedFormat(format!(
                "unrecognised artifact extension '{other}'"
            )))
        }
    };

    let info = ModelInfo {
        path: path.to_path_buf(),
        sha256,
        kind: classifier.kind(),
        name,
    };

    tracing::info!(
        path = %info.path.display(),
        kind = %info.kind,
        name = info.name.as_deref().unwrap_or("-"),
        sha256 = %info.sha256,
        "Classifier loaded"
    );

    Ok(LoadedModel { classifier, info })
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Classifier returning fixed probabilities, for handler tests.
#[cfg(test)]
pub(crate) struct FixedClassifier(pub [f64; 2]);

#[cfg(test)]
impl Classifier for FixedClassifier {
    fn predict_probability(
        &self,
        _features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], ClassifierError> {
        Ok(self.0)
    }

    fn kind(&self) -> String {
        "fixed".into()
    }
}
