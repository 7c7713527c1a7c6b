//! Core domain types for face analysis.

mod error;
mod face;
mod geometry;
mod image_info;
mod labels;
mod landmark;
mod result;

pub use error::AnalysisError;
pub use face::{Face, FaceBox};
pub use geometry::Point;
pub use image_info::ImageInfo;
pub use labels::{FaceShape, SkinTone, UnknownLabel};
pub use landmark::{Keypoint, Landmark, LandmarkSet, UnknownLandmark};
pub use result::{
    AnalysisResult, ImageDimensions, ImageReport, Measurements, ReportError, Rgb,
};
