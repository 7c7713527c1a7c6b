//! Neural face detection on Candle.

mod blazeface;
mod detector;
mod device;
mod loader;

pub use blazeface::{
    BlazeFace, RawDetection, DEFAULT_SCORE_THRESHOLD, INPUT_SIZE, KEYPOINT_ORDER,
};
pub use detector::{BlazeFaceDetector, BLAZEFACE_WEIGHTS};
pub use device::select_device;
pub use loader::{load_safetensors, LazyModel};
