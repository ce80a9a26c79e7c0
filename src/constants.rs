//! Global constants for the annotation toolkit.

/// Minimum width/height in pixels for a committed box.
/// The comparison is strict: a box measuring exactly this size is rejected.
pub const MIN_BOX_SIZE: f32 = 10.0;

/// Multiplicative step applied per zoom-in/zoom-out action on the preview.
pub const ZOOM_STEP: f32 = 1.2;

/// Lower clamp for the preview zoom scale.
pub const MIN_ZOOM: f32 = 0.5;

/// Upper clamp for the preview zoom scale.
pub const MAX_ZOOM: f32 = 5.0;

/// How long a notification stays visible before auto-dismissing.
pub const NOTIFICATION_DURATION_MS: u64 = 3000;

/// Stroke width for box outlines on both canvases.
pub const BOX_LINE_WIDTH: f32 = 2.0;

/// Dash segment length for the in-progress preview rectangle.
pub const PREVIEW_DASH_LENGTH: f32 = 6.0;

/// Label font size on the edit canvas.
pub const EDIT_LABEL_SIZE: f32 = 12.0;

/// Label font size on the preview canvas.
pub const PREVIEW_LABEL_SIZE: f32 = 16.0;

/// Vertical offset of a box label above its top edge.
pub const LABEL_OFFSET: f32 = 5.0;

/// Color used for classes that no longer exist in the registry.
pub const PLACEHOLDER_CLASS_COLOR: &str = "#FF0000";

/// Fallback asset path for dataset images that fail to load.
pub const PLACEHOLDER_IMAGE_PATH: &str = "/static/placeholder.png";
