//! Synthetic images and detections for testing.

use face_style_core::domain::{Face, FaceBox, ImageInfo, Keypoint, Landmark};
use image::{DynamicImage, Rgb, RgbImage};

/// Builder for synthetic test images.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Uniform image of one colour.
    #[must_use]
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb(rgb));
        ImageInfo::new("synthetic://uniform", DynamicImage::ImageRgb8(img))
    }

    /// `centre` inside the middle `patch` x `patch` square, `background` elsewhere.
    ///
    /// Useful for checking that only the centre window is sampled.
    #[must_use]
    pub fn centre_patch(
        width: u32,
        height: u32,
        patch: u32,
        centre: [u8; 3],
        background: [u8; 3],
    ) -> ImageInfo {
        let x0 = (width / 2).saturating_sub(patch / 2);
        let y0 = (height / 2).saturating_sub(patch / 2);
        let img = RgbImage::from_fn(width, height, |x, y| {
            let inside = (x0..x0 + patch).contains(&x) && (y0..y0 + patch).contains(&y);
            Rgb(if inside { centre } else { background })
        });
        ImageInfo::new("synthetic://centre_patch", DynamicImage::ImageRgb8(img))
    }

    /// A light, warm-leaning skin tone (classified Fair).
    #[must_use]
    pub fn fair_skin() -> ImageInfo {
        Self::uniform(200, 200, [240, 215, 200])
    }

    /// Classified Warm Light.
    #[must_use]
    pub fn warm_light_skin() -> ImageInfo {
        Self::uniform(200, 200, [230, 170, 120])
    }

    /// Classified Cool Medium.
    #[must_use]
    pub fn cool_medium_skin() -> ImageInfo {
        Self::uniform(200, 200, [130, 160, 160])
    }

    /// Classified Deep.
    #[must_use]
    pub fn deep_skin() -> ImageInfo {
        Self::uniform(200, 200, [80, 60, 45])
    }

    /// Smaller than the 50x50 sampling window.
    #[must_use]
    pub fn tiny() -> ImageInfo {
        Self::uniform(20, 20, [200, 160, 120])
    }
}

/// Builds [`Face`] detections with chosen keypoints.
///
/// ```
/// use face_style_core::Landmark;
/// use face_style_test_support::FaceBuilder;
///
/// let face = FaceBuilder::new(100.0, 140.0)
///     .eyes(30.0, 70.0, 50.0)
///     .keypoint(Landmark::Chin, 50.0, 140.0)
///     .build();
/// assert_eq!(face.keypoints.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FaceBuilder {
    bbox: FaceBox,
    keypoints: Vec<Keypoint>,
    score: f32,
}

impl FaceBuilder {
    /// A confident detection of the given size at the origin, with no keypoints.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            bbox: FaceBox::sized(width, height),
            keypoints: Vec::new(),
            score: 0.95,
        }
    }

    #[must_use]
    pub const fn at(mut self, x: f64, y: f64) -> Self {
        self.bbox.x = x;
        self.bbox.y = y;
        self
    }

    #[must_use]
    pub const fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn keypoint(mut self, landmark: Landmark, x: f64, y: f64) -> Self {
        self.keypoints.push(Keypoint::new(landmark, x, y));
        self
    }

    /// Both eyes on one horizontal line.
    #[must_use]
    pub fn eyes(self, left_x: f64, right_x: f64, y: f64) -> Self {
        self.keypoint(Landmark::LeftEye, left_x, y)
            .keypoint(Landmark::RightEye, right_x, y)
    }

    /// Both cheeks on one horizontal line.
    #[must_use]
    pub fn cheeks(self, left_x: f64, right_x: f64, y: f64) -> Self {
        self.keypoint(Landmark::LeftCheek, left_x, y)
            .keypoint(Landmark::RightCheek, right_x, y)
    }

    #[must_use]
    pub fn build(self) -> Face {
        Face {
            bbox: self.bbox,
            keypoints: self.keypoints,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_style_core::analysis::{sample_center, tone};
    use face_style_core::SkinTone;

    #[test]
    fn test_uniform_dimensions() {
        let img = SyntheticImageBuilder::uniform(100, 80, [1, 2, 3]);
        assert_eq!((img.width, img.height), (100, 80));
        assert_eq!(img.path, "synthetic://uniform");
    }

    #[test]
    fn test_centre_patch_layout() {
        let img = SyntheticImageBuilder::centre_patch(100, 100, 50, [255, 0, 0], [0, 0, 255]);
        let rgb = img.image.to_rgb8();
        assert_eq!(rgb.get_pixel(50, 50).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(25, 25).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(24, 24).0, [0, 0, 255]);
        assert_eq!(rgb.get_pixel(75, 75).0, [0, 0, 255]);
    }

    #[test]
    fn test_presets_classify_as_named() {
        let cases = [
            (SyntheticImageBuilder::fair_skin(), SkinTone::Fair),
            (SyntheticImageBuilder::warm_light_skin(), SkinTone::WarmLight),
            (SyntheticImageBuilder::cool_medium_skin(), SkinTone::CoolMedium),
            (SyntheticImageBuilder::deep_skin(), SkinTone::Deep),
        ];
        for (img, expected) in cases {
            let rgb = sample_center(&img).unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(tone::classify(rgb), expected, "{rgb:?}");
        }
    }

    #[test]
    fn test_face_builder() {
        let face = FaceBuilder::new(100.0, 140.0)
            .at(10.0, 20.0)
            .score(0.5)
            .eyes(30.0, 70.0, 50.0)
            .build();

        assert_eq!(face.bbox, FaceBox::new(10.0, 20.0, 100.0, 140.0));
        assert!((face.score - 0.5).abs() < f32::EPSILON);
        assert_eq!(face.landmarks().expected_present(), 2);
    }
}
