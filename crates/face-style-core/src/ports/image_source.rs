//! Image source port for enumerating photos to analyse.

use crate::domain::ImageInfo;

/// One entry yielded by an [`ImageSource`].
#[derive(Debug)]
pub struct SourceItem {
    /// Where the image came from, available even when decoding failed.
    pub path: String,
    /// The decoded image, or why it could not be loaded.
    pub image: anyhow::Result<ImageInfo>,
}

/// Port for loading photos from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over the photos of this source, in a stable order.
    fn images(&self) -> Box<dyn Iterator<Item = SourceItem> + Send + '_>;

    /// Returns the total number of photos, if known.
    fn count_hint(&self) -> Option<usize>;
}
