//! Domain models for the recipe collection.
//!
//! This module contains the core domain types: recipes, their ingredients,
//! and configuration.

/// Recipe and ingredient value types.
pub mod recipe;
pub use recipe::{Ingredient, Recipe};

mod config;
pub use config::Config;
