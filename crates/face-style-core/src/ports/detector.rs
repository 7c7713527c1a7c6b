//! Face detector port.

use crate::domain::{Face, ImageInfo};
use crate::AnalysisError;

/// Port for the landmark/face detector.
pub trait FaceDetector: Send + Sync {
    /// Detects faces in `image`, best candidates first.
    ///
    /// An empty vector means no face was found.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ModelUnavailable`] if the detector is not
    /// ready, or [`AnalysisError::Detection`] if inference fails.
    fn detect(&self, image: &ImageInfo) -> Result<Vec<Face>, AnalysisError>;
}
