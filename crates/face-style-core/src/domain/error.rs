//! Error taxonomy for a single face analysis.

use thiserror::Error;

/// Failure of one analysis. None of these are retried internally and no
/// partial result accompanies them.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The detector cannot run (weights missing, unreadable or invalid).
    #[error("face detector unavailable: {0}")]
    ModelUnavailable(String),

    /// The detector ran and found no usable face.
    #[error("no face detected; retake the photo facing the camera in even light")]
    NoFaceDetected,

    /// The detector ran but inference failed.
    #[error("face detection failed: {0}")]
    Detection(String),

    /// The pixel window could not be read.
    #[error("could not sample skin pixels: {0}")]
    Sampling(String),

    /// A measurement the shape rules divide by is zero, negative or not finite.
    #[error("degenerate measurement: {field} = {value}")]
    DegenerateMeasurement {
        /// Name of the offending measurement.
        field: &'static str,
        /// Its value.
        value: f64,
    },
}

impl AnalysisError {
    /// Stable snake_case code for machine-readable output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::NoFaceDetected => "no_face_detected",
            Self::Detection(_) => "detection",
            Self::Sampling(_) => "sampling",
            Self::DegenerateMeasurement { .. } => "degenerate_measurement",
        }
    }
}
