//! BBAT - Bounding Box Annotation Toolkit
//!
//! The core of a bounding-box image annotation tool: a pointer gesture state
//! machine that turns drags into class-tagged boxes, coordinate conversion
//! between pixel space and normalized (YOLO) space, a class registry with
//! persisted settings, and a dataset backend for upload/save/list/delete.
//!
//! The crate is host-neutral: pointer and keyboard input arrive as
//! [`Message`]s, rendering is emitted as declarative display lists the host
//! replays onto a real canvas, and all state transitions are synchronous.

pub mod app;
pub mod canvas;
pub mod constants;
pub mod coords;
pub mod dataset;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod notify;
pub mod registry;
pub mod session;
pub mod settings;
pub mod store;

pub use app::{App, Effect};
pub use message::Message;
