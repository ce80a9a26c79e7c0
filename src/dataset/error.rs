//! Error types for dataset storage operations.

use std::path::PathBuf;

use thiserror::Error;

use super::MAX_UPLOAD_BYTES;

/// Errors from dataset backend operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// I/O error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The upload exceeds the maximum accepted size.
    #[error("upload of {size} bytes exceeds the {MAX_UPLOAD_BYTES} byte limit")]
    TooLarge {
        /// Size of the rejected upload in bytes.
        size: usize,
    },

    /// Uploaded bytes could not be decoded as an image.
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// The file extension is not in the allow-list.
    #[error("File type not allowed: {filename}")]
    DisallowedType {
        /// The offending filename.
        filename: String,
    },

    /// The filename was empty or reduced to nothing after sanitizing.
    #[error("Invalid filename: {filename:?}")]
    InvalidFilename {
        /// The raw filename as received.
        filename: String,
    },

    /// The staged image to save was not found in the uploads area.
    #[error("Source image not found: {path:?}")]
    SourceImageNotFound {
        /// Path where the staged image was expected.
        path: PathBuf,
    },
}
