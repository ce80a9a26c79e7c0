//! Canvas controllers and the display list they render to.
//!
//! Neither controller touches a real canvas. They emit [`scene::DrawOp`]
//! lists that a host replays, which keeps every redraw a pure function of
//! stored state plus the current transform and makes the gesture state
//! machine testable without a live document.

pub mod edit;
pub mod preview;
pub mod scene;

pub use edit::{CommitOutcome, EditCanvas};
pub use preview::{PreviewCanvas, PreviewTransform};
pub use scene::{DisplayList, DrawOp};
