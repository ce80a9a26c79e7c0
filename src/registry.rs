//! Class registry: the id -> {name, color} mapping boxes are tagged with.
//!
//! The registry is never empty. On first run it is seeded with three default
//! classes; deleting the last remaining class is refused. Display order is
//! ascending numeric id, matching how the persisted settings blob enumerates.

use thiserror::Error;

use crate::constants::PLACEHOLDER_CLASS_COLOR;
use crate::model::{ClassDefinition, ClassId};

/// The three classes seeded on first run.
pub fn default_classes() -> Vec<ClassDefinition> {
    vec![
        ClassDefinition::new("0", "Name", "#FF0000"),
        ClassDefinition::new("1", "Date of Birth", "#00FF00"),
        ClassDefinition::new("2", "ID Number", "#0000FF"),
    ]
}

/// Registry of annotation classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRegistry {
    /// Classes kept sorted in display order (ascending numeric id).
    classes: Vec<ClassDefinition>,
}

/// Errors from registry mutations. All leave the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A class name was empty after trimming.
    #[error("class name must not be empty")]
    EmptyName,

    /// The referenced class does not exist.
    #[error("unknown class id '{id}'")]
    UnknownClass {
        /// The id that was not found.
        id: ClassId,
    },

    /// Removing the class would leave the registry empty.
    #[error("at least one class must remain")]
    LastClass,
}

impl ClassRegistry {
    /// Create a registry seeded with the default classes.
    pub fn new() -> Self {
        Self::from_classes(default_classes())
    }

    /// Build a registry from loaded definitions. An empty input falls back
    /// to the defaults so the never-empty invariant holds from the start.
    pub fn from_classes(classes: Vec<ClassDefinition>) -> Self {
        let mut registry = Self { classes };
        if registry.classes.is_empty() {
            log::warn!("Loaded class list was empty, seeding defaults");
            registry.classes = default_classes();
        }
        registry.sort();
        registry
    }

    fn sort(&mut self) {
        // Numeric ids first in ascending order, anything else after.
        self.classes.sort_by(|a, b| {
            match (a.id.parse::<u64>(), b.id.parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                (Err(_), Err(_)) => a.id.cmp(&b.id),
            }
        });
    }

    /// Classes in display order.
    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always false; the registry never empties.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Look up a class by id.
    pub fn get(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.id == id)
    }

    /// Resolve an id for rendering.
    ///
    /// A dangling id degrades to a synthesized placeholder definition
    /// instead of failing, so a box tagged with a deleted class still draws.
    pub fn resolve(&self, id: &str) -> ClassDefinition {
        self.get(id).cloned().unwrap_or_else(|| {
            ClassDefinition::new(id, &format!("Class {id}"), PLACEHOLDER_CLASS_COLOR)
        })
    }

    /// Add a new class and return its id.
    ///
    /// The id is the current class count as a string, and ids are not reused
    /// after deletions. This reproduces the historical quirk: deleting class
    /// "1" out of {"0","1","2"} and then adding derives id "2" from the new
    /// count and replaces the surviving class "2". See DESIGN.md before
    /// changing this.
    pub fn add(&mut self, name: &str, color: &str) -> Result<ClassId, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let id: ClassId = self.classes.len().to_string();
        let class = ClassDefinition::new(id.clone(), name, color);
        if let Some(existing) = self.classes.iter_mut().find(|c| c.id == id) {
            log::warn!("Class id '{}' already exists, replacing it", id);
            *existing = class;
        } else {
            self.classes.push(class);
        }
        self.sort();
        Ok(id)
    }

    /// Rename a class in place.
    pub fn rename(&mut self, id: &str, name: &str) -> Result<(), RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let class = self.get_mut(id)?;
        class.name = name.to_string();
        Ok(())
    }

    /// Change a class color in place.
    pub fn recolor(&mut self, id: &str, color: &str) -> Result<(), RegistryError> {
        let class = self.get_mut(id)?;
        class.color = color.to_string();
        Ok(())
    }

    /// Remove a class. Fails if it is the last one remaining.
    pub fn remove(&mut self, id: &str) -> Result<(), RegistryError> {
        let idx = self
            .classes
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RegistryError::UnknownClass { id: id.to_string() })?;
        if self.classes.len() == 1 {
            return Err(RegistryError::LastClass);
        }
        self.classes.remove(idx);
        Ok(())
    }

    /// Discard all custom classes and restore the seed classes.
    pub fn reset_to_defaults(&mut self) {
        self.classes = default_classes();
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ClassDefinition, RegistryError> {
        self.classes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RegistryError::UnknownClass { id: id.to_string() })
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
