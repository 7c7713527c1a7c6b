//! Skin-tone classification from a mean skin colour.

use crate::domain::{Rgb, SkinTone};

/// Brightness above which skin is fair regardless of undertone.
const FAIR: f64 = 200.0;

/// Lower brightness bound (exclusive), warmth bound (exclusive), and the
/// warm and cool labels of each bracket, brightest first.
const BRACKETS: [(f64, i32, SkinTone, SkinTone); 3] = [
    (170.0, 60, SkinTone::WarmLight, SkinTone::CoolLight),
    (140.0, 40, SkinTone::WarmMedium, SkinTone::CoolMedium),
    (100.0, 30, SkinTone::WarmDeep, SkinTone::CoolDeep),
];

/// Classifies a skin sample by brightness and red-blue warmth.
#[must_use]
pub fn classify(sample: Rgb) -> SkinTone {
    let brightness = sample.brightness();
    if brightness > FAIR {
        return SkinTone::Fair;
    }

    let warmth = sample.warmth();
    BRACKETS
        .iter()
        .find(|(floor, ..)| brightness > *floor)
        .map_or(SkinTone::Deep, |&(_, warm_above, warm, cool)| {
            if warmth > warm_above {
                warm
            } else {
                cool
            }
        })
}
