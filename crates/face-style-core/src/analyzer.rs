//! Analysis orchestration: detector output and pixels in, one result out.

use tracing::debug;

use crate::analysis::{self, shape, tone};
use crate::domain::{AnalysisResult, ImageInfo};
use crate::ports::{FaceDetector, PixelSource};
use crate::AnalysisError;

/// Runs the full pipeline against one detector.
///
/// Holds no per-analysis state; one analyzer may serve any number of
/// concurrent callers.
pub struct FaceAnalyzer<D> {
    detector: D,
}

impl<D: FaceDetector> FaceAnalyzer<D> {
    #[must_use]
    pub const fn new(detector: D) -> Self {
        Self { detector }
    }

    #[must_use]
    pub const fn detector(&self) -> &D {
        &self.detector
    }

    /// Analyses `image`, sampling skin colour from the image itself.
    ///
    /// # Errors
    ///
    /// Propagates every [`AnalysisError`] unchanged; see
    /// [`FaceAnalyzer::analyze_with`].
    pub fn analyze(&self, image: &ImageInfo) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with(image, image)
    }

    /// Analyses `image`, reading skin colour through `pixels`.
    ///
    /// Only the first detection is used; any further faces are ignored.
    /// Confidence filtering is the detector's job.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::ModelUnavailable`] / [`AnalysisError::Detection`]
    ///   from the detector
    /// - [`AnalysisError::NoFaceDetected`] if the detector found nothing
    /// - [`AnalysisError::DegenerateMeasurement`] from shape classification
    /// - [`AnalysisError::Sampling`] from the colour sampler
    pub fn analyze_with(
        &self,
        image: &ImageInfo,
        pixels: &dyn PixelSource,
    ) -> Result<AnalysisResult, AnalysisError> {
        let faces = self.detector.detect(image)?;
        debug!("{}: {} face(s) detected", image.path, faces.len());

        let face = faces
            .into_iter()
            .next()
            .ok_or(AnalysisError::NoFaceDetected)?;

        let (shape_branch, tone_branch) = rayon::join(
            || {
                let measured = analysis::extract(&face.bbox, &face.landmarks());
                shape::classify(&measured.measurements).map(|shape| (measured, shape))
            },
            || analysis::sample_center(pixels).map(|rgb| (rgb, tone::classify(rgb))),
        );
        let (measured, face_shape) = shape_branch?;
        let (skin_sample, skin_tone) = tone_branch?;

        debug!(
            "{}: shape={face_shape} tone={skin_tone} confidence={:.2}",
            image.path, measured.confidence
        );

        Ok(AnalysisResult {
            face_shape,
            skin_tone,
            recommendations: analysis::recommend(face_shape, skin_tone),
            measurements: measured.measurements,
            confidence: measured.confidence,
            skin_sample,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::{Face, FaceBox, FaceShape, Keypoint, Landmark, Rgb, SkinTone};
    use image::{DynamicImage, RgbImage};
    use std::sync::Mutex;

    struct StubDetector(Result<Vec<Face>, AnalysisError>);

    impl FaceDetector for StubDetector {
        fn detect(&self, _image: &ImageInfo) -> Result<Vec<Face>, AnalysisError> {
            self.0.clone()
        }
    }

    struct CountingPixels {
        calls: Mutex<usize>,
    }

    impl PixelSource for CountingPixels {
        fn dimensions(&self) -> Option<(u32, u32)> {
            Some((50, 50))
        }

        fn sample_pixels(&self, _: u32, _: u32, w: u32, h: u32) -> Result<Vec<[u8; 4]>, AnalysisError> {
            *self.calls.lock().unwrap() += 1;
            Ok(vec![[210, 205, 200, 255]; (w * h) as usize])
        }
    }

    fn skin(rgb: [u8; 3]) -> ImageInfo {
        let img = RgbImage::from_pixel(200, 200, image::Rgb(rgb));
        ImageInfo::new("face.png", DynamicImage::ImageRgb8(img))
    }

    fn eyes_only(width: f64, height: f64, score: f32) -> Face {
        Face {
            bbox: FaceBox::sized(width, height),
            keypoints: vec![
                Keypoint::new(Landmark::LeftEye, 80.0, 100.0),
                Keypoint::new(Landmark::RightEye, 120.0, 100.0),
            ],
            score,
        }
    }

    fn analyzer(faces: Result<Vec<Face>, AnalysisError>) -> FaceAnalyzer<StubDetector> {
        FaceAnalyzer::new(StubDetector(faces))
    }

    #[test]
    fn test_full_pipeline() {
        let result = analyzer(Ok(vec![eyes_only(200.0, 200.0, 0.9)]))
            .analyze(&skin([150, 120, 80]))
            .unwrap();

        assert_eq!(result.face_shape, FaceShape::Diamond);
        assert_eq!(result.skin_tone, SkinTone::WarmDeep);
        assert_eq!(result.skin_sample, Rgb::new(150, 120, 80));
        assert!((result.confidence - 2.0 / 6.0).abs() < 1e-12);
        assert!((result.measurements.forehead_width - 52.0).abs() < 1e-9);
        assert_eq!(
            result.recommendations,
            analysis::recommend(FaceShape::Diamond, SkinTone::WarmDeep)
        );
    }

    #[test]
    fn test_no_faces() {
        let err = analyzer(Ok(vec![])).analyze(&skin([0, 0, 0])).unwrap_err();
        assert_eq!(err, AnalysisError::NoFaceDetected);
    }

    #[test]
    fn test_low_scoring_face_is_still_analysed() {
        let result = analyzer(Ok(vec![eyes_only(200.0, 200.0, 0.2)]))
            .analyze(&skin([150, 120, 80]))
            .unwrap();
        assert_eq!(result.face_shape, FaceShape::Diamond);
    }

    #[test]
    fn test_only_first_face_is_used() {
        let mut tall = eyes_only(100.0, 200.0, 0.99);
        tall.keypoints.clear();
        let faces = vec![eyes_only(200.0, 200.0, 0.5), tall];

        let result = analyzer(Ok(faces)).analyze(&skin([150, 120, 80])).unwrap();
        assert_eq!(result.face_shape, FaceShape::Diamond);
        assert!((result.confidence - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_detector_errors_propagate() {
        let unavailable = AnalysisError::ModelUnavailable("weights missing".into());
        let err = analyzer(Err(unavailable.clone()))
            .analyze(&skin([0, 0, 0]))
            .unwrap_err();
        assert_eq!(err, unavailable);
    }

    #[test]
    fn test_zero_area_box_is_degenerate() {
        let err = analyzer(Ok(vec![eyes_only(0.0, 200.0, 1.0)]))
            .analyze(&skin([0, 0, 0]))
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DegenerateMeasurement {
                field: "face_width",
                ..
            }
        ));
    }

    #[test]
    fn test_small_image_is_sampling_error() {
        let tiny = ImageInfo::new("tiny.png", DynamicImage::new_rgb8(20, 20));
        let err = analyzer(Ok(vec![eyes_only(200.0, 200.0, 1.0)]))
            .analyze(&tiny)
            .unwrap_err();
        assert_eq!(err.kind(), "sampling");
    }

    #[test]
    fn test_custom_pixel_source() {
        let pixels = CountingPixels {
            calls: Mutex::new(0),
        };
        let result = analyzer(Ok(vec![eyes_only(200.0, 200.0, 1.0)]))
            .analyze_with(&skin([0, 0, 0]), &pixels)
            .unwrap();

        assert_eq!(result.skin_tone, SkinTone::Fair);
        assert_eq!(*pixels.calls.lock().unwrap(), 1);
    }
}
