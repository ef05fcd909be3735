//! Trained-model persistence and the prediction handle.
//!
//! A [`ModelArtifact`] bundles the fitted classifier, the encoders it was
//! trained with, and the training configuration into one JSON file. The
//! [`Predictor`] loads that file once and then serves predictions from
//! memory.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::encoding::{EncodeError, EncoderSet};
use crate::models::LoanClassifier;
use crate::schema::{ApplicantRecord, Decision, FEATURE_COLUMNS};

/// Everything a prediction needs, produced by one training run.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: LoanClassifier,
    pub encoders: EncoderSet,
    pub config: PipelineConfig,
}

impl ModelArtifact {
    /// Serialize the artifact to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string(self).context("Failed to serialize model artifact")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write model artifact to {}", path.display()))?;
        Ok(())
    }
}

/// Prediction failure, from loading the artifact through decoding the label.
#[derive(Debug)]
pub enum PredictError {
    /// The artifact file does not exist.
    ModelNotFound { path: PathBuf },
    /// The artifact file exists but could not be read.
    ArtifactRead { path: PathBuf, source: std::io::Error },
    /// The artifact file is not a valid serialized model.
    ArtifactParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A field of the input record failed to encode.
    Encode(EncodeError),
    /// The classifier produced a label outside the {Y, N} domain.
    UnexpectedLabel { label: String },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictError::ModelNotFound { path } => write!(
                f,
                "no trained model artifact at '{}'; run `lendscore train` first",
                path.display()
            ),
            PredictError::ArtifactRead { path, source } => write!(
                f,
                "failed to read model artifact '{}': {}",
                path.display(),
                source
            ),
            PredictError::ArtifactParse { path, source } => write!(
                f,
                "model artifact '{}' is not a valid trained model: {}",
                path.display(),
                source
            ),
            PredictError::Encode(err) => err.fmt(f),
            PredictError::UnexpectedLabel { label } => {
                write!(f, "model produced unexpected label '{}'", label)
            }
        }
    }
}

impl Error for PredictError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PredictError::ArtifactRead { source, .. } => Some(source),
            PredictError::ArtifactParse { source, .. } => Some(source),
            PredictError::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EncodeError> for PredictError {
    fn from(err: EncodeError) -> Self {
        PredictError::Encode(err)
    }
}

/// Loaded-once prediction handle over a saved [`ModelArtifact`].
pub struct Predictor {
    artifact: ModelArtifact,
}

impl Predictor {
    /// Load a saved artifact from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Predictor, PredictError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PredictError::ModelNotFound {
                path: path.to_owned(),
            });
        }
        let json = fs::read_to_string(path).map_err(|source| PredictError::ArtifactRead {
            path: path.to_owned(),
            source,
        })?;
        let artifact =
            serde_json::from_str(&json).map_err(|source| PredictError::ArtifactParse {
                path: path.to_owned(),
                source,
            })?;
        Ok(Predictor { artifact })
    }

    /// Wrap an in-memory artifact, e.g. straight after training.
    pub fn from_artifact(artifact: ModelArtifact) -> Predictor {
        Predictor { artifact }
    }

    /// Configuration the model was trained with.
    pub fn config(&self) -> &PipelineConfig {
        &self.artifact.config
    }

    /// Encode one applicant, run the classifier, and decode the decision.
    pub fn predict(&self, record: &ApplicantRecord) -> Result<Decision, PredictError> {
        let row = record.feature_row(&self.artifact.encoders)?;
        let x = Array2::from_shape_vec((1, FEATURE_COLUMNS.len()), row)
            .expect("single-row feature matrix");
        let code = self.artifact.model.predict_codes(&x)[0];
        let label = self.artifact.encoders.label().decode(code)?;
        Decision::from_label(label).ok_or_else(|| PredictError::UnexpectedLabel {
            label: label.to_owned(),
        })
    }
}
