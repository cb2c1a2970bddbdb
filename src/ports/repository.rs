//! Repository port for value table persistence.

use std::path::Path;

use crate::{Result, q_learning::ValueTable};

/// Port for persisting and loading value tables.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (JSON on disk, in memory for tests) without coupling the
/// agent loop to a serialization format.
///
/// # Examples
///
/// ```no_run
/// use arcade_brain::adapters::JsonTableRepository;
/// use arcade_brain::ports::TableRepository;
/// use std::path::Path;
///
/// let repo = JsonTableRepository::new();
/// let table = repo.load(Path::new("q_table.json"))?;
/// repo.save(&table, Path::new("q_table.json"))?;
/// # Ok::<(), arcade_brain::Error>(())
/// ```
pub trait TableRepository {
    /// Overwrite storage at `path` with the full table.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the location cannot be
    /// written.
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()>;

    /// Load the table stored at `path`.
    ///
    /// A missing table is not an error: an empty table is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<ValueTable>;
}
