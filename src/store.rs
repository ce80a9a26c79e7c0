//! Ordered storage for the boxes of the image currently under edit.
//!
//! The store is a stack, not a general collection: boxes are immutable once
//! committed and can only be appended or removed from the end. Overlapping
//! boxes are permitted and never merged. The store, never the rendered pixel
//! buffer, is the source of truth for every redraw.

use thiserror::Error;

use crate::constants::MIN_BOX_SIZE;
use crate::model::PixelBox;

/// Stack of committed boxes for the current edit session.
#[derive(Debug, Clone, Default)]
pub struct BoxStore {
    boxes: Vec<PixelBox>,
}

/// Rejection signal for a box below the minimum commit size.
///
/// The store is unchanged when this is returned; the caller surfaces it as a
/// non-fatal notice and the gesture is simply discarded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("box {width:.0}x{height:.0} below minimum size {}", MIN_BOX_SIZE)]
pub struct BoxRejected {
    /// Width of the rejected box.
    pub width: f32,
    /// Height of the rejected box.
    pub height: f32,
}

impl BoxStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a box, rejecting it if either extent is at or below the
    /// minimum size. The check is strict: exactly minimum-sized boxes fail.
    pub fn push(&mut self, b: PixelBox) -> Result<(), BoxRejected> {
        if !b.meets_min_size() {
            return Err(BoxRejected {
                width: b.width,
                height: b.height,
            });
        }
        self.boxes.push(b);
        Ok(())
    }

    /// Remove and return the most recently committed box.
    /// Returns None on an empty store; callers map that to a notice.
    pub fn pop_last(&mut self) -> Option<PixelBox> {
        self.boxes.pop()
    }

    /// Remove all boxes. Confirmation is the caller's responsibility; the
    /// operation itself is unconditional.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Iterate over committed boxes in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &PixelBox> {
        self.boxes.iter()
    }

    /// The committed boxes in commit order.
    pub fn as_slice(&self) -> &[PixelBox] {
        &self.boxes
    }

    /// Number of committed boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the store holds no boxes.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
