//! JSON implementation of the table repository.
//!
//! The file is a plain object `{state_key: {ACTION: value}}`.

use std::{fs, path::Path};

use tracing::info;

use crate::{
    Error, Result, adapters::atomic_file::write_atomic, ports::TableRepository,
    q_learning::ValueTable,
};

/// JSON-file table repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTableRepository;

impl JsonTableRepository {
    pub fn new() -> Self {
        Self
    }
}

impl TableRepository for JsonTableRepository {
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(table)?;
        write_atomic(path, &bytes)?;
        info!(states = table.len(), path = %path.display(), "saved value table");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ValueTable> {
        if !path.exists() {
            info!(path = %path.display(), "no value table found, starting with an empty one");
            return Ok(ValueTable::new());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| Error::io(format!("read {}", path.display()), source))?;
        let table: ValueTable = serde_json::from_str(&contents)?;
        info!(states = table.len(), path = %path.display(), "loaded value table");
        Ok(table)
    }
}
