//! Face measurement extraction from detector output.
//!
//! Landmarks that are missing fall back to fixed proportions of the face box,
//! so extraction is total. Degenerate boxes are passed through unchanged and
//! rejected later by the shape classifier.

use serde::Serialize;

use crate::domain::{FaceBox, Landmark, LandmarkSet, Measurements};

/// Forehead width as a multiple of the eye distance.
const FOREHEAD_PER_EYE_DISTANCE: f64 = 1.3;
/// Jaw width as a multiple of the cheek-to-cheek distance.
const JAW_PER_CHEEK_DISTANCE: f64 = 0.9;
/// Chin length as a multiple of the nose-to-mouth distance.
const CHIN_PER_NOSE_MOUTH: f64 = 1.5;

/// Eye distance fallback, as a fraction of face width.
const FALLBACK_EYE_DISTANCE: f64 = 0.4;
/// Jaw width fallback, as a fraction of face width.
const FALLBACK_JAW_WIDTH: f64 = 0.85;
/// Chin length fallback, as a fraction of face height.
const FALLBACK_CHIN_LENGTH: f64 = 0.2;

/// Measurements of one face plus how many landmarks backed them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasuredFace {
    pub measurements: Measurements,
    /// Fraction of [`Landmark::EXPECTED`] present, in `[0, 1]`.
    pub confidence: f64,
}

/// Distance between two landmarks, if both are present.
fn span(landmarks: &LandmarkSet, a: Landmark, b: Landmark) -> Option<f64> {
    landmarks.pair(a, b).map(|(pa, pb)| pa.distance(&pb))
}

/// Derives face measurements and a landmark confidence score.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn extract(bbox: &FaceBox, landmarks: &LandmarkSet) -> MeasuredFace {
    let face_width = bbox.width;
    let face_height = bbox.height;

    let eye_distance = span(landmarks, Landmark::LeftEye, Landmark::RightEye)
        .unwrap_or(face_width * FALLBACK_EYE_DISTANCE);
    let jaw_width = span(landmarks, Landmark::LeftCheek, Landmark::RightCheek)
        .map_or(face_width * FALLBACK_JAW_WIDTH, |d| d * JAW_PER_CHEEK_DISTANCE);
    let chin_length = span(landmarks, Landmark::NoseTip, Landmark::Mouth)
        .map_or(face_height * FALLBACK_CHIN_LENGTH, |d| d * CHIN_PER_NOSE_MOUTH);

    let confidence = landmarks.expected_present() as f64 / Landmark::EXPECTED.len() as f64;

    MeasuredFace {
        measurements: Measurements {
            face_width,
            face_height,
            forehead_width: eye_distance * FOREHEAD_PER_EYE_DISTANCE,
            jaw_width,
            chin_length,
        },
        confidence,
    }
}
