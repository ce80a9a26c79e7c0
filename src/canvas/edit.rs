//! Edit canvas controller: the draw-preview-commit gesture state machine.
//!
//! States are `Idle -> Dragging -> Idle`; there is no editing of an existing
//! box. Pointer-up and pointer-leave are treated identically and finalize the
//! gesture at the event coordinates. Every redraw is rebuilt from the box
//! store, never from retained pixels, so a canvas resize only costs a redraw.

use crate::constants::{
    BOX_LINE_WIDTH, EDIT_LABEL_SIZE, LABEL_OFFSET, PREVIEW_DASH_LENGTH,
};
use crate::canvas::scene::{DisplayList, DrawOp};
use crate::model::PixelBox;
use crate::registry::ClassRegistry;
use crate::session::EditSession;

/// Result of finalizing a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The box was appended to the store.
    Committed,
    /// The gesture was discarded: one or both extents were at or below the
    /// minimum size. The caller surfaces a notice.
    TooSmall,
    /// No drag was in progress.
    NotDragging,
}

/// In-progress pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    Dragging {
        start_x: f32,
        start_y: f32,
        current_x: f32,
        current_y: f32,
    },
}

/// Controller for the edit canvas.
#[derive(Debug, Clone, Default)]
pub struct EditCanvas {
    gesture: Gesture,
}

impl EditCanvas {
    /// Create a controller in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Begin a drag at the given canvas-local position.
    ///
    /// The caller guarantees an image is loaded and has already translated
    /// client coordinates by the canvas wrapper's bounding rect.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.gesture = Gesture::Dragging {
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
        };
    }

    /// Track pointer movement. Returns true if a drag is in progress and the
    /// caller should redraw.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging {
                current_x,
                current_y,
                ..
            } => {
                *current_x = x;
                *current_y = y;
                true
            }
        }
    }

    /// Finalize the gesture at the given position (pointer-up and
    /// pointer-leave both land here) and try to commit the resulting box,
    /// tagged with `class_id` and the session's canvas dimensions.
    pub fn finish(
        &mut self,
        x: f32,
        y: f32,
        class_id: &str,
        session: &mut EditSession,
    ) -> CommitOutcome {
        let Gesture::Dragging {
            start_x, start_y, ..
        } = self.gesture
        else {
            return CommitOutcome::NotDragging;
        };
        self.gesture = Gesture::Idle;

        let Some(image) = session.image().cloned() else {
            return CommitOutcome::NotDragging;
        };

        let b = PixelBox::from_corners(
            start_x,
            start_y,
            x,
            y,
            class_id.to_string(),
            image.width,
            image.height,
        );
        match session.store_mut().push(b) {
            Ok(()) => CommitOutcome::Committed,
            Err(rejected) => {
                log::debug!("Discarded gesture: {rejected}");
                CommitOutcome::TooSmall
            }
        }
    }

    /// Abandon any in-progress gesture without committing.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Build a full redraw of the edit canvas: image at origin, committed
    /// boxes with class labels and 1-based indices, and the dashed live
    /// preview rectangle while dragging.
    pub fn render(
        &self,
        session: &EditSession,
        registry: &ClassRegistry,
        selected_class: &str,
    ) -> DisplayList {
        let mut ops = vec![DrawOp::Clear];
        if session.image().is_none() {
            return ops;
        }
        ops.push(DrawOp::Image);

        for (index, b) in session.store().iter().enumerate() {
            let class = registry.resolve(&b.class_id);
            ops.push(DrawOp::Rect {
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
                color: class.color.clone(),
                line_width: BOX_LINE_WIDTH,
                dash: None,
            });
            ops.push(DrawOp::Label {
                text: format!("{} ({})", class.name, index + 1),
                x: b.x,
                y: b.y - LABEL_OFFSET,
                color: class.color,
                font_size: EDIT_LABEL_SIZE,
            });
        }

        if let Gesture::Dragging {
            start_x,
            start_y,
            current_x,
            current_y,
        } = self.gesture
        {
            let color = registry.resolve(selected_class).color;
            let x = start_x.min(current_x);
            let y = start_y.min(current_y);
            let width = (current_x - start_x).abs();
            let height = (current_y - start_y).abs();
            ops.push(DrawOp::Rect {
                x,
                y,
                width,
                height,
                color: color.clone(),
                line_width: BOX_LINE_WIDTH,
                dash: Some(PREVIEW_DASH_LENGTH),
            });
            // Absolute pixel dimensions, rounded for display only.
            ops.push(DrawOp::Label {
                text: format!("{}x{}", width.round(), height.round()),
                x,
                y: y - LABEL_OFFSET,
                color,
                font_size: EDIT_LABEL_SIZE,
            });
        }

        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session() -> EditSession {
        let mut session = EditSession::new();
        session.load("doc.png", 300.0, 200.0);
        session
    }

    fn label_texts(ops: &DisplayList) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Label { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_drag_commits_normalized_box() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();

        canvas.pointer_down(50.0, 50.0);
        assert!(canvas.pointer_move(80.0, 70.0));
        let outcome = canvas.finish(120.0, 90.0, "0", &mut session);

        assert_eq!(outcome, CommitOutcome::Committed);
        assert!(!canvas.is_dragging());
        let b = &session.store().as_slice()[0];
        assert_eq!((b.x, b.y, b.width, b.height), (50.0, 50.0, 70.0, 40.0));
        assert_eq!(b.image_width, 300.0);
        assert_eq!(b.image_height, 200.0);
    }

    #[test]
    fn test_small_drag_discarded() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();

        canvas.pointer_down(10.0, 10.0);
        let outcome = canvas.finish(15.0, 40.0, "0", &mut session);

        assert_eq!(outcome, CommitOutcome::TooSmall);
        assert!(session.store().is_empty());
        assert!(!canvas.is_dragging());
    }

    #[test]
    fn test_finish_without_drag_is_noop() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();
        assert_eq!(
            canvas.finish(50.0, 50.0, "0", &mut session),
            CommitOutcome::NotDragging
        );
    }

    #[test]
    fn test_reverse_drag_direction() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();

        canvas.pointer_down(120.0, 90.0);
        canvas.finish(50.0, 50.0, "0", &mut session);

        let b = &session.store().as_slice()[0];
        assert_eq!((b.x, b.y), (50.0, 50.0));
        assert_eq!((b.width, b.height), (70.0, 40.0));
    }

    #[test]
    fn test_render_without_image_only_clears() {
        let session = EditSession::new();
        let canvas = EditCanvas::new();
        let registry = ClassRegistry::new();
        assert_eq!(canvas.render(&session, &registry, "0"), vec![DrawOp::Clear]);
    }

    #[test]
    fn test_render_labels_committed_boxes() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();
        let registry = ClassRegistry::new();

        canvas.pointer_down(10.0, 10.0);
        canvas.finish(60.0, 60.0, "0", &mut session);
        canvas.pointer_down(70.0, 70.0);
        canvas.finish(120.0, 120.0, "1", &mut session);

        let labels = label_texts(&canvas.render(&session, &registry, "0"));
        assert_eq!(labels, vec!["Name (1)", "Date of Birth (2)"]);
    }

    #[test]
    fn test_pop_last_drops_third_label() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();
        let registry = ClassRegistry::new();

        for i in 0..3 {
            let offset = i as f32 * 30.0;
            canvas.pointer_down(offset, offset);
            canvas.finish(offset + 20.0, offset + 20.0, "0", &mut session);
        }
        assert_eq!(session.store().len(), 3);

        session.store_mut().pop_last().unwrap();
        let labels = label_texts(&canvas.render(&session, &registry, "0"));
        assert_eq!(labels, vec!["Name (1)", "Name (2)"]);
    }

    #[test]
    fn test_live_preview_is_dashed_with_dimension_label() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();
        let registry = ClassRegistry::new();

        canvas.pointer_down(50.0, 50.0);
        canvas.pointer_move(120.4, 90.3);

        let ops = canvas.render(&session, &registry, "2");
        let preview = ops
            .iter()
            .find(|op| matches!(op, DrawOp::Rect { dash: Some(_), .. }))
            .unwrap();
        match preview {
            DrawOp::Rect { x, y, color, .. } => {
                assert_eq!((*x, *y), (50.0, 50.0));
                // Preview strokes in the selected class color.
                assert_eq!(color, "#0000FF");
            }
            _ => unreachable!(),
        }
        assert!(label_texts(&ops).contains(&"70x40".to_string()));
    }

    #[test]
    fn test_redraw_is_pure_function_of_state() {
        let mut session = loaded_session();
        let mut canvas = EditCanvas::new();
        let registry = ClassRegistry::new();

        canvas.pointer_down(10.0, 10.0);
        canvas.finish(60.0, 60.0, "0", &mut session);

        // Simulates a window-resize redraw: same state, same display list.
        let first = canvas.render(&session, &registry, "0");
        let second = canvas.render(&session, &registry, "0");
        assert_eq!(first, second);
    }
}
