//! Categorical labels produced by the classifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Geometric face-shape category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Oblong,
    Heart,
    Triangle,
    Diamond,
    InvertedTriangle,
}

impl FaceShape {
    pub const ALL: [Self; 8] = [
        Self::Oval,
        Self::Round,
        Self::Square,
        Self::Oblong,
        Self::Heart,
        Self::Triangle,
        Self::Diamond,
        Self::InvertedTriangle,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oval => "Oval",
            Self::Round => "Round",
            Self::Square => "Square",
            Self::Oblong => "Oblong",
            Self::Heart => "Heart",
            Self::Triangle => "Triangle",
            Self::Diamond => "Diamond",
            Self::InvertedTriangle => "InvertedTriangle",
        }
    }
}

/// Skin-tone category from brightness and warmth of a skin sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinTone {
    Fair,
    WarmLight,
    CoolLight,
    WarmMedium,
    CoolMedium,
    WarmDeep,
    CoolDeep,
    Deep,
}

impl SkinTone {
    pub const ALL: [Self; 8] = [
        Self::Fair,
        Self::WarmLight,
        Self::CoolLight,
        Self::WarmMedium,
        Self::CoolMedium,
        Self::WarmDeep,
        Self::CoolDeep,
        Self::Deep,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fair => "Fair",
            Self::WarmLight => "WarmLight",
            Self::CoolLight => "CoolLight",
            Self::WarmMedium => "WarmMedium",
            Self::CoolMedium => "CoolMedium",
            Self::WarmDeep => "WarmDeep",
            Self::CoolDeep => "CoolDeep",
            Self::Deep => "Deep",
        }
    }

    /// Whether the tone has a warm undertone. `Fair` and `Deep` carry no
    /// undertone in their label and count as cool.
    #[must_use]
    pub fn is_warm(self) -> bool {
        self.label().contains("Warm")
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label string matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownLabel {
    kind: &'static str,
    value: String,
    expected: String,
}

/// Lowercases and strips `-`, `_` and spaces so `inverted-triangle`,
/// `inverted_triangle` and `InvertedTriangle` compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_label<T: Copy>(
    s: &str,
    kind: &'static str,
    all: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, UnknownLabel> {
    let wanted = normalize(s);
    all.iter()
        .copied()
        .find(|v| normalize(label(*v)) == wanted)
        .ok_or_else(|| UnknownLabel {
            kind,
            value: s.to_string(),
            expected: all.iter().map(|v| label(*v)).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for FaceShape {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, "face shape", &Self::ALL, Self::label)
    }
}

impl FromStr for SkinTone {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, "skin tone", &Self::ALL, Self::label)
    }
}
