//! Face Style Core - domain types, classification rules and face detection
//!
//! This crate holds the analysis pipeline: a [`FaceDetector`] finds faces,
//! [`analysis`] turns the primary face into measurements, a face shape, a skin
//! tone and styling advice, and [`FaceAnalyzer`] ties the steps together.

pub mod analysis;
pub mod analyzer;
pub mod domain;
pub mod inference;
pub mod ports;

pub use analyzer::FaceAnalyzer;
pub use domain::{
    AnalysisError, AnalysisResult, Face, FaceBox, FaceShape, ImageDimensions, ImageInfo,
    ImageReport, Keypoint, Landmark, LandmarkSet, Measurements, ReportError, Rgb, SkinTone,
};
pub use inference::{BlazeFaceDetector, DEFAULT_SCORE_THRESHOLD};
pub use ports::{
    FaceDetector, ImageSource, PixelSource, ProgressEvent, ProgressSink, ResultOutput, SourceItem,
};
