//! Plain-text recipe collection management
//!
//! Recipes live in a single flat text file made of `[Recept]`,
//! `[Ingredienser]`, and `[Instruktioner]` sections. The
//! [`RecipeRepository`] owns the in-memory collection, persists it through
//! the sectioned-text codec in [`storage::recipe_file`], and notifies
//! registered observers after every change to the collection.
//!
//! Presentation and any menu or command-line driver are external
//! collaborators: they query the repository for recipe data and issue
//! load, save, and delete commands against it.

pub mod domain;
pub use domain::{Config, Ingredient, Recipe};

pub mod storage;
pub use storage::{FormatError, LoadError, LookupError, RecipeRepository};
