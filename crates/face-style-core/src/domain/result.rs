//! Analysis result types.

use serde::{Deserialize, Serialize};

use super::{FaceShape, SkinTone};

/// Face proportions derived from one detection, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub face_width: f64,
    pub face_height: f64,
    pub forehead_width: f64,
    pub jaw_width: f64,
    pub chin_length: f64,
}

/// Mean colour of a sampled pixel block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unweighted mean of the three channels.
    #[must_use]
    pub fn brightness(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    /// Red minus blue, the undertone proxy.
    #[must_use]
    pub fn warmth(self) -> i32 {
        i32::from(self.r) - i32::from(self.b)
    }
}

/// Complete result of analysing one photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub face_shape: FaceShape,
    pub skin_tone: SkinTone,
    /// Shape advice first, then palette advice.
    pub recommendations: Vec<String>,
    pub measurements: Measurements,
    /// Fraction of the six expected landmarks the detector reported.
    pub confidence: f64,
    /// The averaged skin colour the tone was classified from.
    pub skin_sample: Rgb,
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Why an image produced no analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    /// Stable error code, see [`crate::AnalysisError::kind`].
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&crate::AnalysisError> for ReportError {
    fn from(err: &crate::AnalysisError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Per-image record emitted by batch runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReport {
    /// Path to the analysed image.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Image dimensions.
    pub dimensions: ImageDimensions,
    /// Present when analysis succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    /// Present when analysis failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

impl ImageReport {
    /// Builds a report from the outcome of one analysis.
    #[must_use]
    pub fn from_outcome(
        path: String,
        timestamp: String,
        dimensions: ImageDimensions,
        outcome: Result<AnalysisResult, crate::AnalysisError>,
    ) -> Self {
        let (analysis, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(e) => (None, Some(ReportError::from(&e))),
        };
        Self {
            path,
            timestamp,
            dimensions,
            analysis,
            error,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.analysis.is_some()
    }
}
