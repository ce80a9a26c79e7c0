//! Declarative drawing commands emitted by the canvas controllers.

/// A single drawing command for the host canvas.
///
/// Coordinates are in canvas pixel space. Ops apply in order; a transform op
/// affects every subsequent op until replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Clear the entire canvas. Hosts must clear under the identity
    /// transform so the full buffer is covered regardless of zoom.
    Clear,

    /// Replace the current affine transform (uniform scale + translation).
    SetTransform {
        /// Uniform scale factor.
        scale: f32,
        /// Horizontal translation in canvas pixels.
        translate_x: f32,
        /// Vertical translation in canvas pixels.
        translate_y: f32,
    },

    /// Draw the current image with its top-left corner at the origin, at
    /// native resolution.
    Image,

    /// Stroke an outlined rectangle.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Hex RGB stroke color.
        color: String,
        /// Stroke width in pixels.
        line_width: f32,
        /// Dash segment length; None strokes a solid outline.
        dash: Option<f32>,
    },

    /// Fill a text label with its baseline at the given position.
    Label {
        text: String,
        x: f32,
        y: f32,
        /// Hex RGB fill color.
        color: String,
        /// Font size in pixels.
        font_size: f32,
    },
}

/// An ordered list of drawing commands for one full redraw.
pub type DisplayList = Vec<DrawOp>;

impl DrawOp {
    /// The identity transform.
    pub fn identity_transform() -> Self {
        DrawOp::SetTransform {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}
