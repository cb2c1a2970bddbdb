//! In-memory table repository for testing.
//!
//! This adapter provides a pure in-memory implementation of TableRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, ports::TableRepository, q_learning::ValueTable};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage, so a test can hand one clone
/// to the agent loop and inspect saves through another.
///
/// # Examples
///
/// ```
/// use arcade_brain::adapters::InMemoryRepository;
/// use arcade_brain::ports::TableRepository;
/// use arcade_brain::q_learning::ValueTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&ValueTable::new(), Path::new("q_table.json"))?;
/// assert_eq!(repo.save_count(), 1);
/// # Ok::<(), arcade_brain::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<Storage>>,
}

#[derive(Default)]
struct Storage {
    tables: HashMap<PathBuf, ValueTable>,
    saves: usize,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `table` at `path`.
    pub fn with_table(path: impl Into<PathBuf>, table: ValueTable) -> Self {
        let repo = Self::new();
        repo.lock().tables.insert(path.into(), table);
        repo
    }

    /// Number of successful save calls so far.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Copy of whatever is stored at `path`.
    pub fn stored(&self, path: &Path) -> Option<ValueTable> {
        self.lock().tables.get(path).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Storage> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TableRepository for InMemoryRepository {
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let mut storage = self.lock();
        storage.tables.insert(path.to_path_buf(), table.clone());
        storage.saves += 1;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ValueTable> {
        Ok(self.stored(path).unwrap_or_default())
    }
}
