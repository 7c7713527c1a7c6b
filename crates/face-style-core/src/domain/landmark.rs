//! Named facial landmarks and a typed lookup over them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Point;

/// The closed vocabulary of keypoint roles a detector may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Landmark {
    LeftEye,
    RightEye,
    NoseTip,
    Mouth,
    LeftCheek,
    RightCheek,
    LeftEar,
    RightEar,
    Chin,
}

impl Landmark {
    /// Every landmark, in slot order.
    pub const ALL: [Self; 9] = [
        Self::LeftEye,
        Self::RightEye,
        Self::NoseTip,
        Self::Mouth,
        Self::LeftCheek,
        Self::RightCheek,
        Self::LeftEar,
        Self::RightEar,
        Self::Chin,
    ];

    /// The six landmarks that count towards measurement confidence.
    pub const EXPECTED: [Self; 6] = [
        Self::LeftEye,
        Self::RightEye,
        Self::NoseTip,
        Self::Mouth,
        Self::LeftCheek,
        Self::RightCheek,
    ];

    /// Wire name of the landmark (`leftEye`, `noseTip`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::NoseTip => "noseTip",
            Self::Mouth => "mouth",
            Self::LeftCheek => "leftCheek",
            Self::RightCheek => "rightCheek",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::Chin => "chin",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown landmark name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown landmark name '{0}'")]
pub struct UnknownLandmark(pub String);

impl FromStr for Landmark {
    type Err = UnknownLandmark;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.name() == s)
            .ok_or_else(|| UnknownLandmark(s.to_string()))
    }
}

/// A named keypoint as produced by a detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    #[serde(rename = "name")]
    pub landmark: Landmark,
    pub x: f64,
    pub y: f64,
}

impl Keypoint {
    #[must_use]
    pub const fn new(landmark: Landmark, x: f64, y: f64) -> Self {
        Self { landmark, x, y }
    }

    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Landmark coordinates keyed by role. Absent landmarks are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LandmarkSet {
    slots: [Option<Point>; 9],
}

impl LandmarkSet {
    /// Builds the set from a detector keypoint list.
    ///
    /// Duplicate names are not expected; if present, the first one wins.
    #[must_use]
    pub fn from_keypoints(keypoints: &[Keypoint]) -> Self {
        let mut set = Self::default();
        for kp in keypoints {
            let slot = &mut set.slots[kp.landmark.slot()];
            if slot.is_none() {
                *slot = Some(kp.point());
            }
        }
        set
    }

    #[must_use]
    pub const fn get(&self, landmark: Landmark) -> Option<Point> {
        self.slots[landmark.slot()]
    }

    #[must_use]
    pub const fn contains(&self, landmark: Landmark) -> bool {
        self.get(landmark).is_some()
    }

    /// Returns both points when both landmarks are present.
    #[must_use]
    pub const fn pair(&self, a: Landmark, b: Landmark) -> Option<(Point, Point)> {
        match (self.get(a), self.get(b)) {
            (Some(pa), Some(pb)) => Some((pa, pb)),
            _ => None,
        }
    }

    /// Number of the six expected landmarks that are present.
    #[must_use]
    pub fn expected_present(&self) -> usize {
        Landmark::EXPECTED
            .iter()
            .filter(|l| self.contains(**l))
            .count()
    }
}

impl FromIterator<Keypoint> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = Keypoint>>(iter: T) -> Self {
        let keypoints: Vec<Keypoint> = iter.into_iter().collect();
        Self::from_keypoints(&keypoints)
    }
}
