//! Detector output: face boxes and their keypoints.

use serde::{Deserialize, Serialize};

use super::{Keypoint, LandmarkSet};

/// Face bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl FaceBox {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size anchored at the origin.
    #[must_use]
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// A single detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Face extent.
    #[serde(rename = "box")]
    pub bbox: FaceBox,
    /// Named landmarks reported for this face.
    pub keypoints: Vec<Keypoint>,
    /// Detector confidence (0.0 to 1.0). Absent in payloads that carry only
    /// a box and keypoints.
    #[serde(default = "unscored")]
    pub score: f32,
}

const fn unscored() -> f32 {
    1.0
}

impl Face {
    /// Typed view of the keypoints.
    #[must_use]
    pub fn landmarks(&self) -> LandmarkSet {
        LandmarkSet::from_keypoints(&self.keypoints)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::Landmark;

    #[test]
    fn test_deserialize_without_score() {
        let json = r#"{
            "box": {"x": 10, "y": 20, "width": 100, "height": 200},
            "keypoints": [{"name": "noseTip", "x": 60, "y": 120}]
        }"#;
        let face: Face = serde_json::from_str(json).unwrap();

        assert_eq!(face.bbox, FaceBox::new(10.0, 20.0, 100.0, 200.0));
        assert!((face.score - 1.0).abs() < f32::EPSILON);
        assert!(face.landmarks().get(Landmark::NoseTip).is_some());
    }
}
