//! Filesystem dataset backend.
//!
//! Layout under the root directory:
//!
//! ```text
//! uploads/            staged images awaiting annotation
//! dataset/images/     annotated images
//! dataset/labels/     one .txt per image, one annotation line per box
//! ```
//!
//! Saving moves the staged image into `dataset/images` and writes its label
//! file; deleting removes both and tolerates files that are already gone.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::coords::NormalizedAnnotation;
use crate::dataset::{
    is_allowed_file, DatasetBackend, DatasetError, DatasetItem, UploadedImage, MAX_UPLOAD_BYTES,
};
use crate::model::PixelBox;

/// Dataset backend storing images and labels on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsBackend {
    upload_dir: PathBuf,
    images_dir: PathBuf,
    labels_dir: PathBuf,
}

impl FsBackend {
    /// Open a backend rooted at the given directory, creating the layout if
    /// it does not exist yet.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let root = root.as_ref();
        let backend = Self {
            upload_dir: root.join("uploads"),
            images_dir: root.join("dataset").join("images"),
            labels_dir: root.join("dataset").join("labels"),
        };
        for dir in [&backend.upload_dir, &backend.images_dir, &backend.labels_dir] {
            std::fs::create_dir_all(dir)?;
            log::debug!("Ensuring folder exists: {:?}", dir);
        }
        Ok(backend)
    }

    /// Directory holding staged uploads.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Directory holding annotated images.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    fn label_path(&self, image_name: &str) -> PathBuf {
        let stem = Path::new(image_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(image_name);
        self.labels_dir.join(format!("{stem}.txt"))
    }
}

/// Reduce a client-supplied filename to a safe basename: path components are
/// stripped and anything outside `[A-Za-z0-9._-]` becomes an underscore.
fn sanitize_filename(filename: &str) -> Option<String> {
    let base = Path::new(filename).file_name()?.to_str()?;
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = safe.trim_matches('.');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl DatasetBackend for FsBackend {
    fn upload(&mut self, original_name: &str, bytes: &[u8]) -> Result<UploadedImage, DatasetError> {
        let safe_name =
            sanitize_filename(original_name).ok_or_else(|| DatasetError::InvalidFilename {
                filename: original_name.to_string(),
            })?;
        if !is_allowed_file(&safe_name) {
            return Err(DatasetError::DisallowedType {
                filename: safe_name,
            });
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(DatasetError::TooLarge { size: bytes.len() });
        }

        let decoded = image::load_from_memory(bytes)?;
        let filename = format!("{}_{}", Uuid::new_v4(), safe_name);
        let path = self.upload_dir.join(&filename);
        log::debug!("Saving uploaded file to: {:?}", path);
        std::fs::write(&path, bytes)?;

        Ok(UploadedImage {
            filename,
            width: decoded.width(),
            height: decoded.height(),
        })
    }

    fn save_annotations(
        &mut self,
        image_name: &str,
        boxes: &[PixelBox],
    ) -> Result<(), DatasetError> {
        let safe_name =
            sanitize_filename(image_name).ok_or_else(|| DatasetError::InvalidFilename {
                filename: image_name.to_string(),
            })?;
        let source = self.upload_dir.join(&safe_name);
        if !source.exists() {
            return Err(DatasetError::SourceImageNotFound { path: source });
        }

        let dest = self.images_dir.join(&safe_name);
        log::debug!("Moving image from {:?} to {:?}", source, dest);
        if std::fs::rename(&source, &dest).is_err() {
            // Rename can fail across filesystems; fall back to copy+remove.
            std::fs::copy(&source, &dest)?;
            std::fs::remove_file(&source)?;
        }

        let mut lines = String::new();
        for b in boxes {
            lines.push_str(&NormalizedAnnotation::from_pixel(b).to_string());
            lines.push('\n');
        }
        let label_path = self.label_path(&safe_name);
        log::debug!("Saving annotations to {:?}", label_path);
        std::fs::write(&label_path, lines)?;

        log::info!(
            "Saved {} annotations for image '{}'",
            boxes.len(),
            safe_name
        );
        Ok(())
    }

    fn list(&self) -> Result<Vec<DatasetItem>, DatasetError> {
        let mut items = Vec::new();
        for entry in std::fs::read_dir(&self.images_dir)? {
            let entry = entry?;
            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_allowed_file(&filename) {
                continue;
            }

            let label_path = self.label_path(&filename);
            let annotations = if label_path.exists() {
                std::fs::read_to_string(&label_path)?
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect()
            } else {
                Vec::new()
            };

            items.push(DatasetItem {
                path: format!("/dataset/{filename}"),
                filename,
                annotations,
            });
        }
        items.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(items)
    }

    fn delete(&mut self, image_name: &str) -> Result<(), DatasetError> {
        let safe_name =
            sanitize_filename(image_name).ok_or_else(|| DatasetError::InvalidFilename {
                filename: image_name.to_string(),
            })?;

        let image_path = self.images_dir.join(&safe_name);
        if image_path.exists() {
            std::fs::remove_file(&image_path)?;
            log::debug!("Deleted image: {:?}", image_path);
        }

        let label_path = self.label_path(&safe_name);
        if label_path.exists() {
            std::fs::remove_file(&label_path)?;
            log::debug!("Deleted label file: {:?}", label_path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test backend in a fresh temp dir, with debug logging available via
    /// `RUST_LOG`. The tempdir handle must stay alive for the test's duration.
    fn test_backend() -> (tempfile::TempDir, FsBackend) {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::open(dir.path()).unwrap();
        (dir, backend)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::new(width, height);
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    fn example_box() -> PixelBox {
        PixelBox::from_corners(50.0, 50.0, 120.0, 90.0, "1".to_string(), 300.0, 200.0)
    }

    #[test]
    fn test_upload_stages_unique_file_with_dimensions() {
        let (_dir, mut backend) = test_backend();

        let uploaded = backend.upload("scan.png", &png_bytes(300, 200)).unwrap();
        assert!(uploaded.filename.ends_with("_scan.png"));
        assert_eq!((uploaded.width, uploaded.height), (300, 200));
        assert!(backend.upload_dir().join(&uploaded.filename).exists());

        // Same original name uploads to a distinct staged file.
        let again = backend.upload("scan.png", &png_bytes(300, 200)).unwrap();
        assert_ne!(uploaded.filename, again.filename);
    }

    #[test]
    fn test_upload_rejects_disallowed_extension() {
        let (_dir, mut backend) = test_backend();
        let err = backend.upload("notes.txt", b"hello").unwrap_err();
        assert!(matches!(err, DatasetError::DisallowedType { .. }));
    }

    #[test]
    fn test_upload_rejects_oversized_payload() {
        let (_dir, mut backend) = test_backend();
        let err = backend
            .upload("huge.png", &vec![0u8; MAX_UPLOAD_BYTES + 1])
            .unwrap_err();
        assert!(matches!(err, DatasetError::TooLarge { size } if size == MAX_UPLOAD_BYTES + 1));
    }

    #[test]
    fn test_upload_rejects_undecodable_bytes() {
        let (_dir, mut backend) = test_backend();
        let err = backend.upload("fake.png", b"not an image").unwrap_err();
        assert!(matches!(err, DatasetError::Image(_)));
    }

    #[test]
    fn test_upload_strips_path_components() {
        let (_dir, mut backend) = test_backend();
        let uploaded = backend
            .upload("../../etc/passwd.png", &png_bytes(2, 2))
            .unwrap();
        assert!(uploaded.filename.ends_with("_passwd.png"));
        assert!(!uploaded.filename.contains(".."));
    }

    #[test]
    fn test_save_moves_image_and_writes_label() {
        let (_dir, mut backend) = test_backend();

        let uploaded = backend.upload("scan.png", &png_bytes(300, 200)).unwrap();
        backend
            .save_annotations(&uploaded.filename, &[example_box()])
            .unwrap();

        assert!(!backend.upload_dir().join(&uploaded.filename).exists());
        assert!(backend.images_dir().join(&uploaded.filename).exists());

        let label = std::fs::read_to_string(backend.label_path(&uploaded.filename)).unwrap();
        let ann = NormalizedAnnotation::parse(label.lines().next().unwrap()).unwrap();
        assert_eq!(ann.class_id, "1");
        assert!((ann.x_center - 0.28333).abs() < 0.001);
        assert!((ann.height - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_save_missing_source_fails() {
        let (_dir, mut backend) = test_backend();
        let err = backend
            .save_annotations("ghost.png", &[example_box()])
            .unwrap_err();
        assert!(matches!(err, DatasetError::SourceImageNotFound { .. }));
    }

    #[test]
    fn test_list_pairs_images_with_annotations() {
        let (_dir, mut backend) = test_backend();

        let uploaded = backend.upload("scan.png", &png_bytes(300, 200)).unwrap();
        backend
            .save_annotations(&uploaded.filename, &[example_box(), example_box()])
            .unwrap();

        let items = backend.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, uploaded.filename);
        assert_eq!(items[0].path, format!("/dataset/{}", uploaded.filename));
        assert_eq!(items[0].annotations.len(), 2);
        assert!(NormalizedAnnotation::parse(&items[0].annotations[0]).is_ok());
    }

    #[test]
    fn test_delete_removes_image_and_label() {
        let (_dir, mut backend) = test_backend();

        let uploaded = backend.upload("scan.png", &png_bytes(300, 200)).unwrap();
        backend
            .save_annotations(&uploaded.filename, &[example_box()])
            .unwrap();

        backend.delete(&uploaded.filename).unwrap();
        assert!(backend.list().unwrap().is_empty());
        assert!(!backend.label_path(&uploaded.filename).exists());
    }

    #[test]
    fn test_delete_tolerates_missing_files() {
        let (_dir, mut backend) = test_backend();
        backend.delete("never-existed.png").unwrap();
    }
}
