//! The single image-under-edit session.
//!
//! Exactly one image may be under edit at a time, and boxes can only exist
//! while an image is loaded. Saving or discarding clears the image and the
//! boxes atomically.

use crate::store::BoxStore;

/// The image currently loaded on the edit canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    /// Backend filename of the image.
    pub name: String,
    /// Canvas width in pixels (the image's native width).
    pub width: f32,
    /// Canvas height in pixels (the image's native height).
    pub height: f32,
}

/// Edit-session state: the current image and its committed boxes.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    image: Option<ImageInfo>,
    store: BoxStore,
}

impl EditSession {
    /// Create an empty session with no image loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an image is loaded.
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// The loaded image, if any.
    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    /// Load a new image, discarding any previous image and its boxes.
    pub fn load(&mut self, name: impl Into<String>, width: f32, height: f32) {
        self.store.clear();
        self.image = Some(ImageInfo {
            name: name.into(),
            width,
            height,
        });
    }

    /// Discard the session: image and boxes are cleared together.
    pub fn discard(&mut self) {
        self.image = None;
        self.store.clear();
    }

    /// The box store for the loaded image.
    pub fn store(&self) -> &BoxStore {
        &self.store
    }

    /// Mutable access to the box store. Meaningful only while an image is
    /// loaded; `load` and `discard` keep the boxes-without-image invariant.
    pub fn store_mut(&mut self) -> &mut BoxStore {
        &mut self.store
    }
}
