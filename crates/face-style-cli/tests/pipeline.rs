//! Pipeline integration tests using synthetic images.
//!
//! Runs the analyzer end to end with a scripted detector, so shape and tone
//! logic is exercised without detector weights.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::expect_used)]

use face_style_adapters::FsImageSource;
use face_style_core::analysis::recommend::{palette_advice, shape_advice};
use face_style_core::{AnalysisError, FaceAnalyzer, FaceShape, ImageSource, SkinTone};
use face_style_test_support::{
    FaceBuilder, MockFaceDetector, MockPixelSource, SyntheticImageBuilder,
};

fn analyzer_with(face: face_style_core::Face) -> FaceAnalyzer<MockFaceDetector> {
    FaceAnalyzer::new(MockFaceDetector::new(vec![face]))
}

/// Square face with only the eyes located.
fn eyes_only_face() -> face_style_core::Face {
    FaceBuilder::new(200.0, 200.0).eyes(80.0, 120.0, 100.0).build()
}

#[test]
fn test_eyes_only_square_face_is_diamond() {
    let analyzer = analyzer_with(eyes_only_face());
    let result = analyzer.analyze(&SyntheticImageBuilder::fair_skin()).unwrap();

    assert_eq!(result.face_shape, FaceShape::Diamond);
    assert_eq!(result.skin_tone, SkinTone::Fair);
    assert!((result.measurements.forehead_width - 52.0).abs() < 1e-9);
    assert!((result.measurements.jaw_width - 170.0).abs() < 1e-9);
    assert!((result.measurements.chin_length - 40.0).abs() < 1e-9);
    assert!((result.confidence - 2.0 / 6.0).abs() < 1e-9);

    let expected: Vec<String> = shape_advice(FaceShape::Diamond)
        .iter()
        .chain(palette_advice(SkinTone::Fair))
        .map(ToString::to_string)
        .collect();
    assert_eq!(result.recommendations, expected);
}

#[test]
fn test_image_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warm.png");
    SyntheticImageBuilder::uniform(160, 120, [150, 120, 80])
        .image
        .save(&path)
        .unwrap();

    let source = FsImageSource::new(vec![path], false);
    let item = source.images().next().unwrap();
    let image = item.image.unwrap();

    let result = analyzer_with(eyes_only_face()).analyze(&image).unwrap();
    assert_eq!(result.skin_tone, SkinTone::WarmDeep);
    assert_eq!((result.skin_sample.r, result.skin_sample.g, result.skin_sample.b), (150, 120, 80));
}

#[test]
fn test_only_centre_window_is_sampled() {
    let image =
        SyntheticImageBuilder::centre_patch(200, 200, 50, [150, 120, 80], [255, 255, 255]);
    let result = analyzer_with(eyes_only_face()).analyze(&image).unwrap();
    assert_eq!(result.skin_tone, SkinTone::WarmDeep);
}

#[test]
fn test_pixels_from_separate_source() {
    let analyzer = analyzer_with(eyes_only_face());
    let pixels = MockPixelSource::uniform(640, 480, [210, 205, 200]);

    let result = analyzer
        .analyze_with(&SyntheticImageBuilder::deep_skin(), &pixels)
        .unwrap();

    assert_eq!(result.skin_tone, SkinTone::Fair);
    assert_eq!(pixels.requests(), vec![(295, 215, 50, 50)]);
}

#[test]
fn test_zero_width_face_is_degenerate() {
    let face = FaceBuilder::new(0.0, 150.0).build();
    let err = analyzer_with(face)
        .analyze(&SyntheticImageBuilder::fair_skin())
        .unwrap_err();
    assert_eq!(err.kind(), "degenerate_measurement");
}

#[test]
fn test_tiny_image_fails_sampling() {
    let err = analyzer_with(eyes_only_face())
        .analyze(&SyntheticImageBuilder::tiny())
        .unwrap_err();
    assert_eq!(err.kind(), "sampling");
}

#[test]
fn test_unreadable_pixels_fail_sampling() {
    let err = analyzer_with(eyes_only_face())
        .analyze_with(&SyntheticImageBuilder::fair_skin(), &MockPixelSource::unreadable())
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Sampling(_)));
}

#[test]
fn test_first_detection_is_analysed() {
    let first = FaceBuilder::new(100.0, 100.0).score(0.5).build();
    let second = FaceBuilder::new(100.0, 200.0).score(0.99).build();
    let analyzer = FaceAnalyzer::new(MockFaceDetector::new(vec![first, second]));

    let result = analyzer
        .analyze(&SyntheticImageBuilder::fair_skin())
        .unwrap();
    assert_ne!(result.face_shape, FaceShape::Oblong);
    assert_eq!(result.measurements.face_height, 100.0);
}

#[test]
fn test_lone_weak_detection_is_analysed() {
    let weak = FaceBuilder::new(100.0, 200.0).score(0.5).build();
    let result = analyzer_with(weak)
        .analyze(&SyntheticImageBuilder::fair_skin())
        .unwrap();
    assert_eq!(result.face_shape, FaceShape::Oblong);
}

#[test]
fn test_detector_error_passes_through() {
    let analyzer = FaceAnalyzer::new(MockFaceDetector::failing(
        AnalysisError::ModelUnavailable("no weights".into()),
    ));
    let err = analyzer
        .analyze(&SyntheticImageBuilder::fair_skin())
        .unwrap_err();
    assert_eq!(err, AnalysisError::ModelUnavailable("no weights".into()));
}

#[test]
fn test_shared_analyzer_across_threads() {
    let analyzer = analyzer_with(eyes_only_face());
    let images = [
        SyntheticImageBuilder::fair_skin(),
        SyntheticImageBuilder::warm_light_skin(),
        SyntheticImageBuilder::cool_medium_skin(),
        SyntheticImageBuilder::deep_skin(),
    ];

    let analyzer = &analyzer;
    let tones: Vec<SkinTone> = std::thread::scope(|s| {
        let handles: Vec<_> = images
            .iter()
            .map(|img| s.spawn(move || analyzer.analyze(img).map(|r| r.skin_tone)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread").expect("analysis"))
            .collect()
    });

    assert_eq!(
        tones,
        vec![
            SkinTone::Fair,
            SkinTone::WarmLight,
            SkinTone::CoolMedium,
            SkinTone::Deep
        ]
    );
}
