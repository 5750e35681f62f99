//! An in-memory recipe collection backed by a single flat text file.

use std::{
    fmt, fs,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    domain::{Config, Recipe},
    storage::recipe_file::{self, LoadError},
};

/// Callback invoked synchronously after every change to the collection.
///
/// Notifications carry no payload beyond "the collection changed"; an
/// observer re-queries the repository for the new state. An observer must
/// not mutate the repository from inside its callback.
pub type ChangeObserver = Box<dyn FnMut()>;

/// Handle identifying a registered [`ChangeObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(usize);

/// Errors raised by index- or value-based recipe lookups.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The requested index is outside the bounds of the collection.
    #[error("index {index} is out of range for a collection of {len} recipes")]
    OutOfRange {
        /// The index that was requested.
        index: usize,
        /// The number of recipes in the collection.
        len: usize,
    },
    /// No recipe in the collection is equal to the supplied value.
    #[error("no recipe matching {name:?} exists in the collection")]
    NotFound {
        /// The name of the recipe that was looked for.
        name: String,
    },
}

/// Holder for recipes.
///
/// Owns the in-memory collection, loads and saves it through the
/// [`recipe_file`] codec, and answers queries with defensive copies so
/// collaborators can never mutate repository-owned state through the
/// returned handles.
///
/// The repository is single-threaded: no operation suspends, and no
/// locking is performed.
pub struct RecipeRepository {
    /// The resolved path of the file the recipes are persisted in.
    path: PathBuf,
    /// The owned collection. Sorted by name after a load; mutations may
    /// disturb that order.
    recipes: Vec<Recipe>,
    /// Whether the collection has been modified since it was last loaded
    /// or saved.
    is_modified: bool,
    observers: Vec<(ObserverId, ChangeObserver)>,
    next_observer: usize,
}

impl fmt::Debug for RecipeRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeRepository")
            .field("path", &self.path)
            .field("recipes", &self.recipes)
            .field("is_modified", &self.is_modified)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl RecipeRepository {
    /// Opens a repository over the recipe file at the given path.
    ///
    /// The path is resolved to an absolute path once, here, and threaded
    /// through every subsequent load and save. The file itself does not
    /// need to exist yet; a missing file surfaces as
    /// [`LoadError::NotFound`] from [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved (for example, an
    /// empty path).
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = std::path::absolute(path)?;

        Ok(Self {
            path,
            recipes: Vec::new(),
            is_modified: false,
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    /// Opens a repository over the recipe file named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured path cannot be resolved.
    pub fn from_config(config: &Config) -> io::Result<Self> {
        Self::new(config.recipes_file())
    }

    /// The resolved path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the collection has been modified since it was last loaded
    /// or saved.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Replaces the in-memory collection with the contents of the backing
    /// file.
    ///
    /// Unsaved changes are discarded: a reload always wins. The file is
    /// parsed into a temporary collection first, so on failure the prior
    /// in-memory state is left untouched. On success the modification flag
    /// is cleared and one change notification is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the backing file does not exist,
    /// [`LoadError::Io`] for any other read failure, and
    /// [`LoadError::Format`] if the contents do not follow the recipe file
    /// grammar.
    pub fn load(&mut self) -> Result<(), LoadError> {
        let file = fs::File::open(&self.path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let loaded = recipe_file::read(BufReader::new(file))?;

        self.recipes = loaded;
        self.is_modified = false;

        tracing::info!(
            "loaded {} recipes from {}",
            self.recipes.len(),
            self.path.display()
        );

        self.notify_changed();

        Ok(())
    }

    /// Writes the current collection to the backing file.
    ///
    /// The collection is serialized to a temporary file in the target's
    /// directory which is then atomically renamed over the target, so a
    /// failure mid-write leaves any prior file intact. The collection
    /// itself is not mutated and no change notification is emitted. On
    /// success the modification flag is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created, written,
    /// or renamed over the target.
    pub fn save(&mut self) -> io::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            recipe_file::write(&mut writer, &self.recipes)?;
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;

        self.is_modified = false;

        tracing::info!(
            "saved {} recipes to {}",
            self.recipes.len(),
            self.path.display()
        );

        Ok(())
    }

    /// Returns a copy of every recipe, in current collection order.
    #[must_use]
    pub fn get_all(&self) -> Vec<Recipe> {
        self.recipes.clone()
    }

    /// Returns a copy of the recipe at the given zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OutOfRange`] if the index is not within the
    /// collection bounds.
    pub fn get_at(&self, index: usize) -> Result<Recipe, LookupError> {
        self.recipes
            .get(index)
            .cloned()
            .ok_or(LookupError::OutOfRange {
                index,
                len: self.recipes.len(),
            })
    }

    /// Deletes a recipe.
    ///
    /// The argument is usually a defensive copy handed out by
    /// [`Self::get_all`] or [`Self::get_at`], so the owned instance is
    /// located by structural equality; the first equal recipe is removed.
    /// On success the modification flag is set and exactly one change
    /// notification is emitted. A failed lookup mutates nothing and emits
    /// no notification.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if no equal recipe exists in the
    /// collection.
    pub fn delete(&mut self, recipe: &Recipe) -> Result<(), LookupError> {
        let position = self
            .recipes
            .iter()
            .position(|owned| owned == recipe)
            .ok_or_else(|| LookupError::NotFound {
                name: recipe.name().to_string(),
            })?;

        self.remove_at(position);

        Ok(())
    }

    /// Deletes the recipe at the given zero-based index.
    ///
    /// Operates directly on the owned instance at that position; no
    /// equality lookup is involved. On success the modification flag is
    /// set and exactly one change notification is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OutOfRange`] if the index is not within the
    /// collection bounds. The collection is left unchanged and no
    /// notification is emitted.
    pub fn delete_at(&mut self, index: usize) -> Result<(), LookupError> {
        if index >= self.recipes.len() {
            return Err(LookupError::OutOfRange {
                index,
                len: self.recipes.len(),
            });
        }

        self.remove_at(index);

        Ok(())
    }

    /// Registers an observer to be called after every collection change.
    ///
    /// Observers are invoked synchronously, on the calling thread, in
    /// registration order.
    pub fn subscribe(&mut self, observer: ChangeObserver) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes a previously registered observer.
    ///
    /// Returns `true` if the observer was registered, `false` if the
    /// handle was unknown (for example, already unsubscribed).
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Removes the recipe at `index`, which must be in bounds.
    fn remove_at(&mut self, index: usize) {
        let removed = self.recipes.remove(index);
        self.is_modified = true;

        tracing::debug!("deleted recipe {:?}", removed.name());

        self.notify_changed();
    }

    fn notify_changed(&mut self) {
        for (_, observer) in &mut self.observers {
            observer();
        }
    }
}
