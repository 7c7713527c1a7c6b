//! Styling recommendations for a shape and tone pair.
//!
//! Two static tables: shape advice comes first, palette advice second. The
//! palette is chosen only by whether the tone is warm.

use crate::domain::{FaceShape, SkinTone};

/// Hairstyle, eyewear and neckline advice for a face shape.
#[must_use]
pub const fn shape_advice(shape: FaceShape) -> &'static [&'static str] {
    match shape {
        FaceShape::Oval => &[
            "Most hairstyles suit balanced proportions; try a textured lob or long layers",
            "Almost any frame works; oversized square frames add definition",
        ],
        FaceShape::Round => &[
            "Add height with volume at the crown and keep the sides sleek",
            "Choose angular or rectangular frames to sharpen the outline",
            "V-necks and long pendants lengthen the face",
        ],
        FaceShape::Square => &[
            "Soften the jaw with side-swept bangs and loose waves",
            "Round or oval frames balance strong angles",
        ],
        FaceShape::Oblong => &[
            "Keep length moderate and add width with waves or a blunt fringe",
            "Deep frames with decorative temples shorten the face visually",
            "Crew and boat necklines add horizontal balance",
        ],
        FaceShape::Heart => &[
            "Chin-length bobs and side parts fill out the lower face",
            "Bottom-heavy or rimless frames offset a wider forehead",
        ],
        FaceShape::Triangle => &[
            "Build volume at the temples with layers above the jaw",
            "Cat-eye or browline frames widen the upper face",
        ],
        FaceShape::Diamond => &[
            "Fringes and chin-length cuts balance narrow forehead and jaw",
            "Oval or rimless frames soften prominent cheekbones",
        ],
        FaceShape::InvertedTriangle => &[
            "Add fullness below the ears with waves or a shoulder-length cut",
            "Light-coloured or rimless frames keep the brow line quiet",
            "Scoop necklines widen the lower half",
        ],
    }
}

const WARM_PALETTE: &[&str] = &[
    "Warm undertone: earthy shades like olive, terracotta, mustard and coral flatter you",
    "Gold jewellery and honey or copper hair tones complement warm skin",
];

const COOL_PALETTE: &[&str] = &[
    "Cool undertone: jewel tones like emerald, sapphire, berry and icy pastels flatter you",
    "Silver or platinum jewellery and ash or cool-brown hair tones complement cool skin",
];

/// Colour palette advice for a skin tone.
#[must_use]
pub fn palette_advice(tone: SkinTone) -> &'static [&'static str] {
    if tone.is_warm() {
        WARM_PALETTE
    } else {
        COOL_PALETTE
    }
}

/// Full recommendation list: shape advice followed by palette advice.
#[must_use]
pub fn recommend(shape: FaceShape, tone: SkinTone) -> Vec<String> {
    shape_advice(shape)
        .iter()
        .chain(palette_advice(tone))
        .map(|s| (*s).to_string())
        .collect()
}
