//! Pixel-space bounding box model.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_BOX_SIZE;
use crate::model::ClassId;

/// A committed bounding box in the pixel space of the edit canvas.
///
/// Boxes are transient: they exist only for the duration of an edit session
/// and never come back from storage in this form. The canvas dimensions are
/// captured at commit time so normalization stays correct even if the canvas
/// is later resized.
///
/// The serialized shape matches the save-annotation wire format:
/// `{x, y, width, height, class, imageWidth, imageHeight}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelBox {
    /// Top-left corner X coordinate.
    pub x: f32,
    /// Top-left corner Y coordinate.
    pub y: f32,
    /// Width of the box, always non-negative.
    pub width: f32,
    /// Height of the box, always non-negative.
    pub height: f32,
    /// Class this box is tagged with.
    #[serde(rename = "class")]
    pub class_id: ClassId,
    /// Canvas width at the time the box was committed.
    pub image_width: f32,
    /// Canvas height at the time the box was committed.
    pub image_height: f32,
}

impl PixelBox {
    /// Build a box from two corner points of a drag gesture.
    ///
    /// The top-left corner is the componentwise minimum of the corners and
    /// the extents are absolute differences, so the result is the same
    /// regardless of drag direction.
    pub fn from_corners(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        class_id: ClassId,
        image_width: f32,
        image_height: f32,
    ) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
            class_id,
            image_width,
            image_height,
        }
    }

    /// Whether both extents strictly exceed the minimum commit size.
    pub fn meets_min_size(&self) -> bool {
        self.width > MIN_BOX_SIZE && self.height > MIN_BOX_SIZE
    }
}
