//! Progress reporting port for UI integration.

use crate::domain::ImageReport;

/// Events emitted during analysis for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Analysis finished for an image, successfully or not.
    Completed {
        /// The per-image report.
        report: ImageReport,
    },
    /// An image was skipped due to an error.
    Skipped {
        /// Path to the image.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Total images analysed (including failed analyses).
        processed: usize,
        /// Images whose analysis failed.
        failed: usize,
        /// Total images skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
