//! Inference device selection.

use candle_core::Device;
use tracing::debug;

/// Picks Metal or CUDA when compiled in and available, otherwise the CPU.
#[must_use]
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            tracing::info!("running detector on Metal");
            return device;
        }
        Err(e) => debug!(error = %e, "Metal unavailable"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            tracing::info!("running detector on CUDA");
            return device;
        }
        Err(e) => debug!(error = %e, "CUDA unavailable"),
    }

    debug!("running detector on CPU");
    Device::Cpu
}
