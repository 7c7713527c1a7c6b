//! Mock implementations of core port traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use face_style_core::domain::{AnalysisError, Face, ImageInfo, ImageReport};
use face_style_core::ports::{
    FaceDetector, ImageSource, PixelSource, ProgressEvent, ProgressSink, ResultOutput, SourceItem,
};

/// Detector returning a canned outcome for every image.
pub struct MockFaceDetector {
    outcome: Result<Vec<Face>, AnalysisError>,
    calls: AtomicUsize,
}

impl MockFaceDetector {
    #[must_use]
    pub const fn new(faces: Vec<Face>) -> Self {
        Self {
            outcome: Ok(faces),
            calls: AtomicUsize::new(0),
        }
    }

    /// Detects nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Fails every call with `error`.
    #[must_use]
    pub const fn failing(error: AnalysisError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `detect` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FaceDetector for MockFaceDetector {
    fn detect(&self, _image: &ImageInfo) -> Result<Vec<Face>, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Pixel source filled with one colour, recording every requested window.
pub struct MockPixelSource {
    dimensions: Option<(u32, u32)>,
    fill: [u8; 4],
    requests: Mutex<Vec<(u32, u32, u32, u32)>>,
}

impl MockPixelSource {
    /// Opaque `rgb` everywhere.
    #[must_use]
    pub const fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            dimensions: Some((width, height)),
            fill: [rgb[0], rgb[1], rgb[2], 255],
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A source whose dimensions cannot be determined.
    #[must_use]
    pub const fn unreadable() -> Self {
        Self {
            dimensions: None,
            fill: [0, 0, 0, 0],
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Windows requested so far as `(x, y, width, height)`.
    #[must_use]
    pub fn requests(&self) -> Vec<(u32, u32, u32, u32)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PixelSource for MockPixelSource {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    fn sample_pixels(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<[u8; 4]>, AnalysisError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((x, y, width, height));

        let (w, h) = self
            .dimensions
            .ok_or_else(|| AnalysisError::Sampling("pixel data unavailable".into()))?;
        if x.saturating_add(width) > w || y.saturating_add(height) > h {
            return Err(AnalysisError::Sampling(format!(
                "window {width}x{height} at ({x}, {y}) exceeds {w}x{h}"
            )));
        }
        Ok(vec![self.fill; (width * height) as usize])
    }
}

/// Image source yielding pre-built images and decode failures.
pub struct MockImageSource {
    items: Vec<(String, Result<ImageInfo, String>)>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            items: images
                .into_iter()
                .map(|img| (img.path.clone(), Ok(img)))
                .collect(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Appends an entry that fails to load with `message`.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.items.push((path.into(), Err(message.into())));
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = SourceItem> + Send + '_> {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;

        Box::new(self.items.iter().map(|(path, image)| SourceItem {
            path: path.clone(),
            image: image.clone().map_err(anyhow::Error::msg),
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<ImageReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<ImageReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &ImageReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Captures progress events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// `(processed, failed, skipped)` from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                processed,
                failed,
                skipped,
            } => Some((*processed, *failed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
