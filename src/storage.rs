//! Persistence for the recipe collection.
//!
//! [`recipe_file`] is the leaf codec that converts a text stream to and
//! from a sequence of recipes; [`RecipeRepository`] owns the in-memory
//! collection and applies the codec for its load and save operations.

/// Sectioned-text serialization for recipe collections.
pub mod recipe_file;
mod repository;

pub use recipe_file::{FormatError, LoadError};
pub use repository::{ChangeObserver, LookupError, ObserverId, RecipeRepository};
