//! Pixel-buffer port.

use crate::AnalysisError;

/// Read-only access to an image's pixels.
pub trait PixelSource: Send + Sync {
    /// Width and height of the readable surface, `None` if there is none.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Returns the `width` x `height` window whose top-left corner is
    /// `(x, y)` as RGBA quadruples in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Sampling`] if the window cannot be read.
    fn sample_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<[u8; 4]>, AnalysisError>;
}
