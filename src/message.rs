//! Application message types.
//!
//! All host events are represented as messages in the Elm architecture
//! style; [`crate::App::update`] consumes them and returns effects.

use crate::dataset::DatasetItem;
use crate::keybindings::Key;
use crate::model::ClassId;

/// Messages that can be sent to update application state.
#[derive(Debug, Clone)]
pub enum Message {
    // Edit canvas pointer events, in canvas-local pixel coordinates.
    // The host translates client coordinates by the canvas wrapper's
    // bounding rect before dispatching.
    /// Pointer pressed on the edit canvas.
    PointerDown { x: f32, y: f32 },
    /// Pointer moved over the edit canvas.
    PointerMove { x: f32, y: f32 },
    /// Pointer released on the edit canvas.
    PointerUp { x: f32, y: f32 },
    /// Pointer left the edit canvas; finalizes like a release.
    PointerLeave { x: f32, y: f32 },
    /// The containing window resized; the canvas needs a redraw from state.
    CanvasResized,

    // Image lifecycle
    /// An image file was chosen for upload.
    UploadImage {
        original_name: String,
        bytes: Vec<u8>,
    },
    /// Save the current boxes to the dataset.
    SaveAnnotations,
    /// Remove all boxes from the current image. The host has already asked
    /// the user for confirmation; the operation itself is unconditional.
    ClearAnnotations,
    /// Remove the most recently committed box.
    RemoveLastBox,

    // Class registry
    /// Select the class new boxes are tagged with.
    SelectClass(ClassId),
    /// Add a new class.
    AddClass { name: String, color: String },
    /// Rename an existing class.
    RenameClass { id: ClassId, name: String },
    /// Change an existing class color.
    RecolorClass { id: ClassId, color: String },
    /// Delete a class.
    RemoveClass { id: ClassId },
    /// Restore the default classes.
    ResetClasses,

    // Dataset view
    /// Reload the dataset listing.
    RefreshDataset,
    /// Open the preview modal for a dataset item. The host supplies the
    /// decoded image dimensions.
    OpenPreview {
        item: DatasetItem,
        image_width: f32,
        image_height: f32,
    },
    /// Close the preview modal.
    ClosePreview,
    /// Delete a dataset image and its annotations. Confirmation happened
    /// host-side.
    DeleteImage { image_name: String },

    // Preview zoom controls
    /// Zoom the preview in one step.
    ZoomIn,
    /// Zoom the preview out one step.
    ZoomOut,
    /// Reset the preview transform.
    ResetZoom,

    // Keyboard
    /// A global key press.
    KeyPressed { key: Key, ctrl_or_cmd: bool },
}
