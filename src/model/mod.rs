//! Data models for the annotation toolkit.

mod annotation;
mod class;

pub use annotation::PixelBox;
pub use class::{ClassDefinition, ClassId};
