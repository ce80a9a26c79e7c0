//! Class definition model for annotation classes.

use serde::{Deserialize, Serialize};

/// Identifier for an annotation class.
///
/// Ids are numeric strings assigned densely from "0" and are stable once
/// assigned; they are never renumbered after deletions.
pub type ClassId = String;

/// An annotation class with a display name and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Unique identifier for the class.
    pub id: ClassId,
    /// Display name of the class, non-empty.
    pub name: String,
    /// Hex RGB color, e.g. `#FF0000`.
    pub color: String,
}

impl ClassDefinition {
    /// Create a new class definition.
    pub fn new(id: impl Into<ClassId>, name: &str, color: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}
