//! Human-readable output adapter.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use face_style_core::{ImageReport, ResultOutput};

/// Writes one indented block per report.
pub struct TextOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextOutput {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

/// Renders a report as text.
pub fn render(report: &ImageReport) -> String {
    let mut out = format!(
        "{} ({}x{})\n",
        report.path, report.dimensions.width, report.dimensions.height
    );

    if let Some(a) = &report.analysis {
        let rgb = a.skin_sample;
        let _ = writeln!(out, "  face shape:  {}", a.face_shape);
        let _ = writeln!(
            out,
            "  skin tone:   {} (sample {}, {}, {})",
            a.skin_tone, rgb.r, rgb.g, rgb.b
        );
        let _ = writeln!(out, "  confidence:  {:.2}", a.confidence);
        out.push_str("  recommendations:\n");
        for line in &a.recommendations {
            let _ = writeln!(out, "    - {line}");
        }
    }

    if let Some(e) = &report.error {
        let _ = writeln!(out, "  error ({}): {}", e.kind, e.message);
    }

    out
}

impl ResultOutput for TextOutput {
    fn write(&self, report: &ImageReport) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", render(report))?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::output::json::tests::Capture;
    use face_style_core::{
        AnalysisError, AnalysisResult, FaceShape, ImageDimensions, Measurements, Rgb, SkinTone,
    };

    fn success() -> ImageReport {
        ImageReport::from_outcome(
            "me.jpg".into(),
            "2024-01-01T00:00:00Z".into(),
            ImageDimensions::new(640, 480),
            Ok(AnalysisResult {
                face_shape: FaceShape::Heart,
                skin_tone: SkinTone::CoolLight,
                recommendations: vec!["Side-swept bangs".into(), "Jewel tones".into()],
                measurements: Measurements {
                    face_width: 100.0,
                    face_height: 140.0,
                    forehead_width: 65.0,
                    jaw_width: 70.0,
                    chin_length: 20.0,
                },
                confidence: 0.5,
                skin_sample: Rgb::new(180, 170, 200),
            }),
        )
    }

    #[test]
    fn test_render_success() {
        let text = render(&success());
        assert!(text.starts_with("me.jpg (640x480)\n"));
        assert!(text.contains("face shape:  Heart"));
        assert!(text.contains("skin tone:   CoolLight (sample 180, 170, 200)"));
        assert!(text.contains("confidence:  0.50"));
        assert!(text.contains("    - Jewel tones\n"));
        assert!(!text.contains("error"));
    }

    #[test]
    fn test_render_failure() {
        let report = ImageReport::from_outcome(
            "blank.png".into(),
            "2024-01-01T00:00:00Z".into(),
            ImageDimensions::new(10, 10),
            Err(AnalysisError::Sampling("window exceeds image".into())),
        );
        let text = render(&report);
        assert!(text.contains("error (sampling): "));
        assert!(!text.contains("recommendations"));
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let capture = Capture::default();
        let output = TextOutput::new(Box::new(capture.clone()));
        output.write(&success()).unwrap();
        output.write(&success()).unwrap();
        output.flush().unwrap();
        assert_eq!(capture.text().matches("\n\n").count(), 2);
    }
}
