//! Dataset storage boundary: upload, save, list, delete.
//!
//! The boundary is a trait so hosts can swap the storage strategy; the
//! bundled [`FsBackend`] mirrors the original service's on-disk layout
//! (an uploads area plus `dataset/images` and `dataset/labels`).

mod error;
mod fs;

pub use error::DatasetError;
pub use fs::FsBackend;

use serde::{Deserialize, Serialize};

use crate::model::PixelBox;

/// Image extensions the dataset accepts.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Maximum accepted upload size in bytes (16 MB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Check whether a filename carries an allowed image extension.
pub fn is_allowed_file(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
}

/// A freshly uploaded image, staged for annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Unique filename assigned by the backend.
    pub filename: String,
    /// Native image width in pixels.
    pub width: u32,
    /// Native image height in pixels.
    pub height: u32,
}

/// One annotated image in the dataset listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetItem {
    /// Image filename within the dataset.
    pub filename: String,
    /// Path the host can load the image from.
    pub path: String,
    /// Persisted annotation lines, one per box.
    pub annotations: Vec<String>,
}

impl DatasetItem {
    /// Path the host should render for this item.
    ///
    /// Hosts pass `false` once the image has failed to load; the item then
    /// degrades to the bundled placeholder asset instead of a broken image.
    pub fn display_path(&self, image_ok: bool) -> &str {
        if image_ok {
            &self.path
        } else {
            crate::constants::PLACEHOLDER_IMAGE_PATH
        }
    }
}

/// Aggregate counts over a dataset listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetStats {
    /// Number of images in the dataset.
    pub total_images: usize,
    /// Number of annotations across all images.
    pub total_annotations: usize,
}

impl DatasetStats {
    /// Compute stats over a listing.
    pub fn from_items(items: &[DatasetItem]) -> Self {
        Self {
            total_images: items.len(),
            total_annotations: items.iter().map(|i| i.annotations.len()).sum(),
        }
    }
}

/// Storage backend for the annotation dataset.
pub trait DatasetBackend {
    /// Stage an uploaded image and probe its dimensions.
    ///
    /// Rejects disallowed extensions and undecodable data. The returned
    /// filename is unique; the original name survives only as a suffix.
    fn upload(&mut self, original_name: &str, bytes: &[u8]) -> Result<UploadedImage, DatasetError>;

    /// Persist the boxes for a staged image and move it into the dataset.
    ///
    /// Each box is normalized against the dimensions it carries and written
    /// as one annotation line.
    fn save_annotations(&mut self, image_name: &str, boxes: &[PixelBox])
    -> Result<(), DatasetError>;

    /// List every annotated image with its annotation lines.
    fn list(&self) -> Result<Vec<DatasetItem>, DatasetError>;

    /// Delete an image and its annotations. Missing files are tolerated.
    fn delete(&mut self, image_name: &str) -> Result<(), DatasetError>;
}
