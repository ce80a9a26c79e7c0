//! Coordinate conversion between pixel space and normalized annotation space.
//!
//! Persisted annotations use the YOLO text convention: one line per box with
//! five space-separated fields `class x_center y_center width height`, where
//! everything but the class id is a fraction of the image dimensions in
//! [0, 1]. Pixel boxes use a top-left origin. The conversions here are pure
//! and never touch any canvas state.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ClassId, PixelBox};

/// A persisted annotation in normalized (center, extent) form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAnnotation {
    /// Class this annotation is tagged with.
    pub class_id: ClassId,
    /// Box center X as a fraction of image width.
    pub x_center: f32,
    /// Box center Y as a fraction of image height.
    pub y_center: f32,
    /// Box width as a fraction of image width.
    pub width: f32,
    /// Box height as a fraction of image height.
    pub height: f32,
}

impl NormalizedAnnotation {
    /// Normalize a pixel box against the dimensions it carries.
    ///
    /// The caller guarantees positive dimensions; a box only exists after a
    /// canvas was sized from a loaded image.
    pub fn from_pixel(b: &PixelBox) -> Self {
        Self {
            class_id: b.class_id.clone(),
            x_center: (b.x + b.width / 2.0) / b.image_width,
            y_center: (b.y + b.height / 2.0) / b.image_height,
            width: b.width / b.image_width,
            height: b.height / b.image_height,
        }
    }

    /// Convert back to pixel-space `(x, y, width, height)` against the given
    /// image dimensions.
    ///
    /// Used only for rendering overlays; a persisted annotation is never
    /// reconstructed into an editable [`PixelBox`].
    pub fn to_pixel(&self, image_width: f32, image_height: f32) -> (f32, f32, f32, f32) {
        let w = self.width * image_width;
        let h = self.height * image_height;
        let x = (self.x_center - self.width / 2.0) * image_width;
        let y = (self.y_center - self.height / 2.0) * image_height;
        (x, y, w, h)
    }

    /// Parse a single annotation line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 5 {
            return Err(ParseError::MissingFields { found: parts.len() });
        }

        let field = |idx: usize, name: &'static str| -> Result<f32, ParseError> {
            parts[idx]
                .parse::<f32>()
                .map_err(|_| ParseError::InvalidNumber {
                    field: name,
                    value: parts[idx].to_string(),
                })
        };

        Ok(Self {
            class_id: parts[0].to_string(),
            x_center: field(1, "x_center")?,
            y_center: field(2, "y_center")?,
            width: field(3, "width")?,
            height: field(4, "height")?,
        })
    }
}

impl fmt::Display for NormalizedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id, self.x_center, self.y_center, self.width, self.height
        )
    }
}

/// Errors from parsing a persisted annotation line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line had fewer than the five required fields.
    #[error("annotation line has {found} fields, expected 5")]
    MissingFields {
        /// Number of fields actually present.
        found: usize,
    },

    /// A numeric field failed to parse.
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// The raw token that failed to parse.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn example_box() -> PixelBox {
        PixelBox::from_corners(50.0, 50.0, 120.0, 90.0, "1".to_string(), 300.0, 200.0)
    }

    #[test]
    fn test_normalize_example_drag() {
        let ann = NormalizedAnnotation::from_pixel(&example_box());
        assert!(approx_eq(ann.x_center, 0.28333));
        assert!(approx_eq(ann.y_center, 0.35));
        assert!(approx_eq(ann.width, 0.23333));
        assert!(approx_eq(ann.height, 0.2));
    }

    #[test]
    fn test_pixel_round_trip() {
        let b = example_box();
        let ann = NormalizedAnnotation::from_pixel(&b);
        let (x, y, w, h) = ann.to_pixel(300.0, 200.0);
        assert!(approx_eq(x, b.x));
        assert!(approx_eq(y, b.y));
        assert!(approx_eq(w, b.width));
        assert!(approx_eq(h, b.height));
    }

    #[test]
    fn test_parse_line() {
        let ann = NormalizedAnnotation::parse("0 0.5 0.5 0.2 0.3").unwrap();
        assert_eq!(ann.class_id, "0");
        assert!(approx_eq(ann.x_center, 0.5));
        assert!(approx_eq(ann.height, 0.3));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let ann = NormalizedAnnotation::parse("  2 0.1 0.2 0.3 0.4 \n").unwrap();
        assert_eq!(ann.class_id, "2");
    }

    #[test]
    fn test_parse_rejects_short_line() {
        let err = NormalizedAnnotation::parse("0 0.5 0.5").unwrap_err();
        assert_eq!(err, ParseError::MissingFields { found: 3 });
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = NormalizedAnnotation::parse("0 a 0.5 0.2 0.3").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "x_center", .. }));
    }

    #[test]
    fn test_display_round_trip() {
        let ann = NormalizedAnnotation::from_pixel(&example_box());
        let reparsed = NormalizedAnnotation::parse(&ann.to_string()).unwrap();
        assert!(approx_eq(reparsed.x_center, ann.x_center));
        assert!(approx_eq(reparsed.width, ann.width));
        assert_eq!(reparsed.class_id, ann.class_id);
    }
}
