//! Face Style Adapters - filesystem and model-store adapters for face-style.

pub mod fs;
pub mod models;

pub use fs::FsImageSource;
pub use models::{model_path, models_dir, set_models_dir};
