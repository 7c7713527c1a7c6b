//! Decoded input images.

use image::{DynamicImage, GenericImageView};

use crate::ports::PixelSource;
use crate::AnalysisError;

/// Basic image information extracted during loading.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path to the image file.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            path: path.into(),
            width,
            height,
            image,
        }
    }
}

impl PixelSource for ImageInfo {
    fn dimensions(&self) -> Option<(u32, u32)> {
        (self.width > 0 && self.height > 0).then_some((self.width, self.height))
    }

    fn sample_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<[u8; 4]>, AnalysisError> {
        let fits = x
            .checked_add(width)
            .zip(y.checked_add(height))
            .is_some_and(|(right, bottom)| right <= self.width && bottom <= self.height);
        if !fits {
            return Err(AnalysisError::Sampling(format!(
                "{width}x{height} window at ({x}, {y}) exceeds {}x{} image",
                self.width, self.height
            )));
        }

        let window = self.image.view(x, y, width, height).to_image();
        Ok(window.pixels().map(|px| px.0).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reads_dimensions() {
        let info = ImageInfo::new("a.png", DynamicImage::new_rgb8(64, 48));
        assert_eq!((info.width, info.height), (64, 48));
        assert_eq!(info.dimensions(), Some((64, 48)));
    }

    #[test]
    fn test_empty_image_has_no_surface() {
        let info = ImageInfo::new("empty.png", DynamicImage::new_rgb8(0, 0));
        assert_eq!(info.dimensions(), None);
    }

    #[test]
    fn test_sample_is_row_major_rgba() {
        let img = image::RgbImage::from_fn(4, 4, |x, y| {
            image::Rgb([u8::try_from(x).unwrap(), u8::try_from(y).unwrap(), 7])
        });
        let info = ImageInfo::new("grid.png", DynamicImage::ImageRgb8(img));
        let px = info.sample_pixels(1, 2, 2, 2).unwrap();
        assert_eq!(px, vec![[1, 2, 7, 255], [2, 2, 7, 255], [1, 3, 7, 255], [2, 3, 7, 255]]);
    }

    #[test]
    fn test_sample_out_of_bounds_is_sampling_error() {
        let info = ImageInfo::new("small.png", DynamicImage::new_rgb8(10, 10));
        let err = info.sample_pixels(5, 5, 10, 10).unwrap_err();
        assert_eq!(err.kind(), "sampling");
    }
}
