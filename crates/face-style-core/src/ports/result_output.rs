//! Result output port for writing image reports.

use crate::domain::ImageReport;

/// Port for outputting image reports.
pub trait ResultOutput: Send + Sync {
    /// Writes a single image report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &ImageReport) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
