//! [`FaceDetector`] backed by `BlazeFace`.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::blazeface::BlazeFace;
use super::device::select_device;
use super::loader::LazyModel;
use crate::domain::{AnalysisError, Face, ImageInfo};
use crate::ports::FaceDetector;

/// File name of the detector weights inside the models directory.
pub const BLAZEFACE_WEIGHTS: &str = "blazeface.safetensors";

/// Face detector that loads `BlazeFace` weights on first use.
pub struct BlazeFaceDetector {
    weights: PathBuf,
    model: Option<LazyModel<BlazeFace>>,
    min_confidence: f32,
}

impl BlazeFaceDetector {
    /// Creates a detector reading weights from `models_dir` that reports
    /// detections scoring at least `min_confidence`.
    ///
    /// A missing weights file is not an error here; every call to
    /// [`FaceDetector::detect`] reports it as [`AnalysisError::ModelUnavailable`].
    #[must_use]
    pub fn new(models_dir: &Path, min_confidence: f32) -> Self {
        let weights = models_dir.join(BLAZEFACE_WEIGHTS);
        let model = if weights.exists() {
            Some(LazyModel::new(&weights, select_device(), BlazeFace::new))
        } else {
            debug!(path = %weights.display(), "detector weights not installed");
            None
        };
        Self {
            weights,
            model,
            min_confidence,
        }
    }

    #[must_use]
    pub const fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// True if the weights file was present at construction.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.model.is_some()
    }
}

impl FaceDetector for BlazeFaceDetector {
    #[instrument(skip_all, fields(path = %image.path))]
    fn detect(&self, image: &ImageInfo) -> Result<Vec<Face>, AnalysisError> {
        let Some(lazy) = &self.model else {
            return Err(AnalysisError::ModelUnavailable(format!(
                "{} not found; run `face-style models fetch`",
                self.weights.display()
            )));
        };

        let model = lazy
            .get()
            .map_err(|e| AnalysisError::ModelUnavailable(format!("{e:#}")))?;
        let raw = model
            .detect(&image.image, self.min_confidence)
            .map_err(|e| AnalysisError::Detection(format!("{e:#}")))?;

        debug!(faces = raw.len(), "detector finished");
        Ok(raw
            .iter()
            .map(|d| d.to_face(image.width, image.height))
            .collect())
    }
}
