//! JSON output adapter.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use face_style_core::{ImageReport, ResultOutput};

enum Layout {
    /// One object per line, written immediately.
    Lines,
    /// Reports buffered until `flush`, then written as one array.
    Array {
        pretty: bool,
        buffered: Mutex<Vec<ImageReport>>,
    },
}

/// JSON output adapter.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    layout: Layout,
}

impl JsonOutput {
    /// JSON Lines to stdout.
    #[must_use]
    pub fn lines_stdout() -> Self {
        Self::lines(Box::new(io::stdout()))
    }

    /// A single JSON array to stdout.
    #[must_use]
    pub fn array_stdout(pretty: bool) -> Self {
        Self::array(Box::new(io::stdout()), pretty)
    }

    #[must_use]
    pub fn lines(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout: Layout::Lines,
        }
    }

    #[must_use]
    pub fn array(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout: Layout::Array {
                pretty,
                buffered: Mutex::new(Vec::new()),
            },
        }
    }

    fn write_line(&self, json: &str) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, report: &ImageReport) -> Result<()> {
        match &self.layout {
            Layout::Lines => self.write_line(&serde_json::to_string(report)?),
            Layout::Array { buffered, .. } => {
                buffered
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(report.clone());
                Ok(())
            }
        }
    }

    fn flush(&self) -> Result<()> {
        if let Layout::Array { pretty, buffered } = &self.layout {
            let reports = std::mem::take(&mut *buffered.lock().unwrap_or_else(PoisonError::into_inner));
            let json = if *pretty {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            self.write_line(&json)?;
        }

        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use face_style_core::{AnalysisError, ImageDimensions};
    use std::sync::Arc;

    /// Shared in-memory writer.
    #[derive(Clone, Default)]
    pub struct Capture(pub Arc<Mutex<Vec<u8>>>);

    impl Capture {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn report(path: &str) -> ImageReport {
        ImageReport::from_outcome(
            path.into(),
            "2024-01-01T00:00:00Z".into(),
            ImageDimensions::new(640, 480),
            Err(AnalysisError::NoFaceDetected),
        )
    }

    #[test]
    fn test_lines_written_immediately() {
        let capture = Capture::default();
        let output = JsonOutput::lines(Box::new(capture.clone()));

        output.write(&report("a.jpg")).unwrap();
        assert_eq!(capture.text().lines().count(), 1);

        output.write(&report("b.jpg")).unwrap();
        output.flush().unwrap();

        let values: Vec<serde_json::Value> = capture
            .text()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["path"], "b.jpg");
        assert_eq!(values[0]["error"]["kind"], "no_face_detected");
        assert!(values[0].get("analysis").is_none());
    }

    #[test]
    fn test_array_written_on_flush() {
        let capture = Capture::default();
        let output = JsonOutput::array(Box::new(capture.clone()), false);

        output.write(&report("a.jpg")).unwrap();
        output.write(&report("b.jpg")).unwrap();
        assert!(capture.text().is_empty());

        output.flush().unwrap();
        let value: serde_json::Value = serde_json::from_str(&capture.text()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_empty_array() {
        let capture = Capture::default();
        let output = JsonOutput::array(Box::new(capture.clone()), true);
        output.flush().unwrap();
        assert_eq!(capture.text().trim(), "[]");
    }
}
