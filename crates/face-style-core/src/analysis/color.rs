//! Skin colour sampling from the centre of an image.

use crate::domain::Rgb;
use crate::ports::PixelSource;
use crate::AnalysisError;

/// Side length of the square sampling window, in pixels.
pub const WINDOW_SIZE: u32 = 50;

/// Averages the `WINDOW_SIZE` square centred on the image into one colour.
///
/// Channel means are rounded to the nearest integer, halves rounding up.
///
/// # Errors
///
/// Returns [`AnalysisError::Sampling`] if the source has no readable surface,
/// is smaller than the window, or returns a malformed sample.
pub fn sample_center(source: &dyn PixelSource) -> Result<Rgb, AnalysisError> {
    let (width, height) = source
        .dimensions()
        .ok_or_else(|| AnalysisError::Sampling("image has no readable pixel surface".into()))?;

    if width < WINDOW_SIZE || height < WINDOW_SIZE {
        return Err(AnalysisError::Sampling(format!(
            "image is {width}x{height}, at least {WINDOW_SIZE}x{WINDOW_SIZE} is required"
        )));
    }

    let half = WINDOW_SIZE / 2;
    let x = width / 2 - half;
    let y = height / 2 - half;

    let pixels = source.sample_pixels(x, y, WINDOW_SIZE, WINDOW_SIZE)?;
    let expected = (WINDOW_SIZE * WINDOW_SIZE) as usize;
    if pixels.len() != expected {
        return Err(AnalysisError::Sampling(format!(
            "pixel source returned {} pixels, expected {expected}",
            pixels.len()
        )));
    }

    Ok(mean_rgb(&pixels))
}

/// Channel-wise mean of a non-empty pixel slice; alpha is ignored.
fn mean_rgb(pixels: &[[u8; 4]]) -> Rgb {
    let mut sums = [0u64; 3];
    for px in pixels {
        for (sum, &channel) in sums.iter_mut().zip(&px[..3]) {
            *sum += u64::from(channel);
        }
    }

    let n = pixels.len() as u64;
    let mean = |sum: u64| u8::try_from((sum + n / 2) / n).unwrap_or(u8::MAX);
    Rgb::new(mean(sums[0]), mean(sums[1]), mean(sums[2]))
}
