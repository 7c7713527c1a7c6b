//! Face-shape classification.
//!
//! The classifier is an ordered rule table evaluated top to bottom; the first
//! rule whose predicate holds decides the label, and [`FaceShape::Oval`] is
//! the default when none does.

use crate::domain::{FaceShape, Measurements};
use crate::AnalysisError;

/// Height/width ratio at or above which a face is oblong.
const OBLONG_MIN_RATIO: f64 = 1.75;
/// Height/width ratio below which a balanced face is round.
const ROUND_MAX_RATIO: f64 = 1.25;
/// Forehead/jaw ratios within this distance of 1 count as balanced.
const BALANCE_TOLERANCE: f64 = 0.1;
/// Forehead/jaw ratio below which the jaw dominates.
const NARROW_FOREHEAD: f64 = 0.9;
/// Forehead/jaw ratio above which the forehead dominates.
const WIDE_FOREHEAD: f64 = 1.1;
/// Chin/height ratio below which the chin is short.
const SHORT_CHIN: f64 = 0.15;
/// Exclusive width/height band for square faces.
const SQUARE_WIDTH_HEIGHT: (f64, f64) = (0.65, 0.75);

/// Proportions the rules are written against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    /// `face_height / face_width`
    pub ratio: f64,
    /// `forehead_width / jaw_width`
    pub forehead_jaw: f64,
    /// `face_width / face_height`
    pub width_height: f64,
    /// `chin_length / face_height`
    pub chin: f64,
}

impl Ratios {
    /// Computes the ratios, refusing measurements that would divide by zero
    /// or carry non-finite values into the rules.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DegenerateMeasurement`] naming the first bad
    /// field.
    pub fn from_measurements(m: &Measurements) -> Result<Self, AnalysisError> {
        for (field, value) in [
            ("face_width", m.face_width),
            ("face_height", m.face_height),
            ("jaw_width", m.jaw_width),
            ("forehead_width", m.forehead_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::DegenerateMeasurement { field, value });
            }
        }

        Ok(Self {
            ratio: m.face_height / m.face_width,
            forehead_jaw: m.forehead_width / m.jaw_width,
            width_height: m.face_width / m.face_height,
            chin: m.chin_length / m.face_height,
        })
    }

    fn balanced(&self) -> bool {
        (self.forehead_jaw - 1.0).abs() < BALANCE_TOLERANCE
    }
}

/// One row of the cascade.
pub struct ShapeRule {
    /// Short description used in trace logs.
    pub name: &'static str,
    pub matches: fn(&Ratios) -> bool,
    pub shape: FaceShape,
}

/// The cascade, in evaluation order.
pub const RULES: &[ShapeRule] = &[
    ShapeRule {
        name: "elongated",
        matches: |r| r.ratio >= OBLONG_MIN_RATIO,
        shape: FaceShape::Oblong,
    },
    ShapeRule {
        name: "short and balanced",
        matches: |r| r.ratio < ROUND_MAX_RATIO && r.balanced(),
        shape: FaceShape::Round,
    },
    ShapeRule {
        name: "wide jaw, short chin",
        matches: |r| r.forehead_jaw < NARROW_FOREHEAD && r.chin < SHORT_CHIN,
        shape: FaceShape::Triangle,
    },
    ShapeRule {
        name: "wide jaw",
        matches: |r| r.forehead_jaw < NARROW_FOREHEAD,
        shape: FaceShape::Diamond,
    },
    ShapeRule {
        name: "wide forehead, short chin",
        matches: |r| r.forehead_jaw > WIDE_FOREHEAD && r.chin < SHORT_CHIN,
        shape: FaceShape::Heart,
    },
    ShapeRule {
        name: "wide forehead",
        matches: |r| r.forehead_jaw > WIDE_FOREHEAD,
        shape: FaceShape::InvertedTriangle,
    },
    ShapeRule {
        name: "square band, balanced",
        matches: |r| {
            let (lo, hi) = SQUARE_WIDTH_HEIGHT;
            r.width_height > lo && r.width_height < hi && r.balanced()
        },
        shape: FaceShape::Square,
    },
];

/// Label used when no rule matches.
pub const DEFAULT_SHAPE: FaceShape = FaceShape::Oval;

/// Applies the rule table to already validated ratios.
#[must_use]
pub fn classify_ratios(ratios: &Ratios) -> FaceShape {
    RULES
        .iter()
        .find(|rule| (rule.matches)(ratios))
        .map_or(DEFAULT_SHAPE, |rule| {
            tracing::trace!(rule = rule.name, shape = %rule.shape, "shape rule matched");
            rule.shape
        })
}

/// Classifies a face's shape from its measurements.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateMeasurement`] if a measurement used as
/// a divisor is zero, negative or not finite.
pub fn classify(measurements: &Measurements) -> Result<FaceShape, AnalysisError> {
    Ratios::from_measurements(measurements).map(|r| classify_ratios(&r))
}
