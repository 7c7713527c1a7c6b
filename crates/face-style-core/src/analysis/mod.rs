//! Pure measurement and classification rules.
//!
//! Every function here is synchronous, deterministic and free of shared
//! state; the orchestration lives in [`crate::analyzer`].

pub mod color;
pub mod measurement;
pub mod recommend;
pub mod shape;
pub mod tone;

pub use color::sample_center;
pub use measurement::{extract, MeasuredFace};
pub use recommend::recommend;
