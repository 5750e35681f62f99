//! The sectioned-text codec for the recipe file.
//!
//! A recipe file is a flat text file made of three kinds of section, each
//! introduced by an exact marker line:
//!
//! ```text
//! [Recept]
//! Pancakes
//! [Ingredienser]
//! 2;dl;flour
//! 3;st;egg
//! [Instruktioner]
//! Mix
//! Fry
//! ```
//!
//! The marker literals are exact, case-sensitive, and not configurable.
//! Blank lines are ignored wherever they occur. The next `[Recept]` marker
//! unambiguously starts a new record, so no separator is needed between
//! recipes.

use std::io::{self, BufRead, Write};

use crate::domain::{Ingredient, Recipe};

/// Introduces a recipe record; the next data line is the recipe name.
pub const SECTION_RECIPE: &str = "[Recept]";

/// Introduces the ingredient lines of the current recipe.
pub const SECTION_INGREDIENTS: &str = "[Ingredienser]";

/// Introduces the instruction lines of the current recipe.
pub const SECTION_INSTRUCTIONS: &str = "[Instruktioner]";

/// Specifies how the next data line read from the file will be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    /// No section marker has been seen yet; data lines are an error.
    Indeterminate,
    /// The next data line is the name of a new recipe.
    RecipeName,
    /// The next data line is an `amount;measure;name` ingredient.
    Ingredient,
    /// The next data line is an instruction, taken verbatim.
    Instruction,
}

/// Errors that can occur when reading a recipe file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The recipe file was not found.
    #[error("recipe file not found")]
    NotFound,
    /// An I/O error occurred while reading.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The file contents do not follow the recipe file grammar.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Structural errors in the recipe file grammar.
///
/// Distinct from [`LoadError::Io`] so a caller can tell "bad file contents"
/// apart from "can't read the file at all". Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// An ingredient line did not split into exactly three `;`-separated
    /// fields.
    #[error("line {line}: expected 3 ';'-separated ingredient fields, found {found}")]
    IngredientFields {
        /// 1-based line number of the offending line.
        line: usize,
        /// Number of fields the line actually split into.
        found: usize,
    },
    /// A data line appeared before any section marker.
    #[error("line {line}: data before any section marker")]
    OrphanData {
        /// 1-based line number of the offending line.
        line: usize,
    },
    /// An ingredient or instruction appeared before any recipe was named.
    #[error("line {line}: no recipe declared before this data line")]
    MissingRecipe {
        /// 1-based line number of the offending line.
        line: usize,
    },
}

/// Reads an entire recipe file from the given reader.
///
/// Parsing is all-or-nothing: the first format error aborts the whole read.
/// On success the recipes are returned sorted by name (stable, ascending,
/// byte-wise `str` ordering), regardless of their order in the file.
///
/// # Errors
///
/// Returns an error if reading from the underlying stream fails, or if the
/// contents do not follow the grammar described in the module docs.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Recipe>, LoadError> {
    let mut recipes: Vec<Recipe> = Vec::new();
    let mut state = ReadState::Indeterminate;

    for (index, line) in reader.lines().enumerate() {
        let mut line = line?;
        let number = index + 1;

        // Tolerate CRLF line endings.
        if line.ends_with('\r') {
            line.pop();
        }

        if line.is_empty() {
            continue;
        }

        if line == SECTION_RECIPE {
            state = ReadState::RecipeName;
        } else if line == SECTION_INGREDIENTS {
            state = ReadState::Ingredient;
        } else if line == SECTION_INSTRUCTIONS {
            state = ReadState::Instruction;
        } else {
            match state {
                ReadState::Indeterminate => {
                    return Err(FormatError::OrphanData { line: number }.into());
                }
                ReadState::RecipeName => recipes.push(Recipe::new(line)),
                ReadState::Ingredient => {
                    let fields: Vec<&str> = line.split(';').collect();
                    if fields.len() != 3 {
                        return Err(FormatError::IngredientFields {
                            line: number,
                            found: fields.len(),
                        }
                        .into());
                    }
                    let recipe = recipes
                        .last_mut()
                        .ok_or(FormatError::MissingRecipe { line: number })?;
                    recipe.add_ingredient(Ingredient::new(fields[0], fields[1], fields[2]));
                }
                ReadState::Instruction => {
                    let recipe = recipes
                        .last_mut()
                        .ok_or(FormatError::MissingRecipe { line: number })?;
                    recipe.add_instruction(line);
                }
            }
        }
    }

    recipes.sort_by(|a, b| a.name().cmp(b.name()));

    Ok(recipes)
}

/// Writes the given recipes to the writer in collection order.
///
/// The output reproduces the grammar described in the module docs, so
/// anything written here reads back unchanged through [`read`] (modulo the
/// sort [`read`] applies).
///
/// # Errors
///
/// Returns an error if writing to the underlying stream fails.
pub fn write<W: Write>(writer: &mut W, recipes: &[Recipe]) -> io::Result<()> {
    for recipe in recipes {
        writeln!(writer, "{SECTION_RECIPE}")?;
        writeln!(writer, "{}", recipe.name())?;
        writeln!(writer, "{SECTION_INGREDIENTS}")?;
        for ingredient in recipe.ingredients() {
            writeln!(
                writer,
                "{};{};{}",
                ingredient.amount(),
                ingredient.measure(),
                ingredient.name()
            )?;
        }
        writeln!(writer, "{SECTION_INSTRUCTIONS}")?;
        for instruction in recipe.instructions() {
            writeln!(writer, "{instruction}")?;
        }
    }

    Ok(())
}
