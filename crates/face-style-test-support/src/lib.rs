//! Test support utilities for face-style.
//!
//! Provides mocks for every core port, synthetic images and a detection
//! builder for exercising the analysis pipeline without model weights.
//!
//! # Example
//!
//! ```
//! use face_style_core::{FaceAnalyzer, FaceShape, SkinTone};
//! use face_style_test_support::{FaceBuilder, MockFaceDetector, SyntheticImageBuilder};
//!
//! let face = FaceBuilder::new(100.0, 200.0).build();
//! let analyzer = FaceAnalyzer::new(MockFaceDetector::new(vec![face]));
//!
//! let result = analyzer.analyze(&SyntheticImageBuilder::fair_skin()).unwrap();
//! assert_eq!(result.face_shape, FaceShape::Oblong);
//! assert_eq!(result.skin_tone, SkinTone::Fair);
//! ```

mod builders;
mod mocks;

pub use builders::{FaceBuilder, SyntheticImageBuilder};
pub use mocks::{
    MockFaceDetector, MockImageSource, MockPixelSource, MockProgressSink, MockResultOutput,
};
