//! Preview canvas controller: read-only render of persisted annotations
//! under a clamped zoom transform.

use crate::canvas::scene::{DisplayList, DrawOp};
use crate::constants::{
    BOX_LINE_WIDTH, LABEL_OFFSET, MAX_ZOOM, MIN_ZOOM, PREVIEW_LABEL_SIZE, ZOOM_STEP,
};
use crate::coords::NormalizedAnnotation;
use crate::registry::ClassRegistry;

/// Scale + translation applied to the preview canvas.
///
/// Only the discrete zoom controls mutate this; there is no drag-to-pan, so
/// the translation stays at zero until a host grows one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl PreviewTransform {
    /// The identity transform (scale 1, no translation).
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// Multiply the scale by the zoom step, clamped to the maximum.
    pub fn zoom_in(self) -> Self {
        Self {
            scale: (self.scale * ZOOM_STEP).min(MAX_ZOOM),
            ..self
        }
    }

    /// Divide the scale by the zoom step, clamped to the minimum.
    pub fn zoom_out(self) -> Self {
        Self {
            scale: (self.scale / ZOOM_STEP).max(MIN_ZOOM),
            ..self
        }
    }
}

impl Default for PreviewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Controller for the zoomable, read-only preview of a dataset image.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCanvas {
    transform: PreviewTransform,
    image_width: f32,
    image_height: f32,
    annotations: Vec<NormalizedAnnotation>,
}

impl PreviewCanvas {
    /// Open a preview for an image. The transform starts at identity.
    pub fn open(
        image_width: f32,
        image_height: f32,
        annotations: Vec<NormalizedAnnotation>,
    ) -> Self {
        Self {
            transform: PreviewTransform::identity(),
            image_width,
            image_height,
            annotations,
        }
    }

    /// The current transform.
    pub fn transform(&self) -> PreviewTransform {
        self.transform
    }

    /// The annotations shown on this preview.
    pub fn annotations(&self) -> &[NormalizedAnnotation] {
        &self.annotations
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) {
        self.transform = self.transform.zoom_in();
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) {
        self.transform = self.transform.zoom_out();
    }

    /// Reset to the identity transform.
    pub fn reset(&mut self) {
        self.transform = PreviewTransform::identity();
    }

    /// Build a full redraw: clear under the identity transform so the whole
    /// buffer is covered at any zoom, then apply the current transform and
    /// draw the image plus every annotation converted back to pixel space.
    pub fn render(&self, registry: &ClassRegistry) -> DisplayList {
        let mut ops = vec![
            DrawOp::identity_transform(),
            DrawOp::Clear,
            DrawOp::SetTransform {
                scale: self.transform.scale,
                translate_x: self.transform.translate_x,
                translate_y: self.transform.translate_y,
            },
            DrawOp::Image,
        ];

        for (index, ann) in self.annotations.iter().enumerate() {
            let class = registry.resolve(&ann.class_id);
            let (x, y, width, height) = ann.to_pixel(self.image_width, self.image_height);
            ops.push(DrawOp::Rect {
                x,
                y,
                width,
                height,
                color: class.color.clone(),
                line_width: BOX_LINE_WIDTH,
                dash: None,
            });
            ops.push(DrawOp::Label {
                text: format!("{} ({})", class.name, index + 1),
                x,
                y: y - LABEL_OFFSET,
                color: class.color,
                font_size: PREVIEW_LABEL_SIZE,
            });
        }

        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn preview_with(annotations: Vec<NormalizedAnnotation>) -> PreviewCanvas {
        PreviewCanvas::open(300.0, 200.0, annotations)
    }

    #[test]
    fn test_three_zoom_ins() {
        let mut preview = preview_with(vec![]);
        preview.zoom_in();
        preview.zoom_in();
        preview.zoom_in();
        assert!(approx_eq(preview.transform().scale, 1.728));
    }

    #[test]
    fn test_zoom_in_saturates_at_max() {
        let mut preview = preview_with(vec![]);
        for _ in 0..50 {
            preview.zoom_in();
        }
        assert_eq!(preview.transform().scale, 5.0);
    }

    #[test]
    fn test_zoom_out_saturates_at_min() {
        let mut preview = preview_with(vec![]);
        for _ in 0..50 {
            preview.zoom_out();
        }
        assert_eq!(preview.transform().scale, 0.5);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut preview = preview_with(vec![]);
        preview.zoom_in();
        preview.reset();
        assert_eq!(preview.transform(), PreviewTransform::identity());
    }

    #[test]
    fn test_render_clears_under_identity_before_transform() {
        let mut preview = preview_with(vec![]);
        preview.zoom_in();
        let ops = preview.render(&ClassRegistry::new());

        assert_eq!(ops[0], DrawOp::identity_transform());
        assert_eq!(ops[1], DrawOp::Clear);
        match ops[2] {
            DrawOp::SetTransform { scale, .. } => assert!(approx_eq(scale, 1.2)),
            _ => panic!("Expected transform before image"),
        }
        assert_eq!(ops[3], DrawOp::Image);
    }

    #[test]
    fn test_render_converts_annotations_to_pixel_space() {
        let ann = NormalizedAnnotation::parse("1 0.283333 0.35 0.233333 0.2").unwrap();
        let preview = preview_with(vec![ann]);
        let ops = preview.render(&ClassRegistry::new());

        let rect = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Rect {
                    x, y, width, height, ..
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .unwrap();
        assert!(approx_eq(rect.0.round(), 50.0));
        assert!(approx_eq(rect.1.round(), 50.0));
        assert!(approx_eq(rect.2.round(), 70.0));
        assert!(approx_eq(rect.3.round(), 40.0));
    }

    #[test]
    fn test_unknown_class_renders_placeholder() {
        let ann = NormalizedAnnotation::parse("9 0.5 0.5 0.2 0.2").unwrap();
        let preview = preview_with(vec![ann]);
        let ops = preview.render(&ClassRegistry::new());

        let label = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Label { text, color, .. } => Some((text.clone(), color.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(label.0, "Class 9 (1)");
        assert_eq!(label.1, "#FF0000");
    }
}
