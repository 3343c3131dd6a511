//! Process-memory row store.
//!
//! Rows live for the lifetime of the store value. The mutex only keeps the
//! store `Sync`; it does not serialize read-modify-write sequences issued by
//! different sessions.

use crate::repo::record_store::{Record, RecordStore, StoreError, StoreResult, Table};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory implementation of [`RecordStore`].
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: Mutex<BTreeMap<Table, Vec<Record>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held in `table`.
    pub fn row_count(&self, table: Table) -> StoreResult<usize> {
        Ok(self.lock()?.get(&table).map_or(0, Vec::len))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, BTreeMap<Table, Vec<Record>>>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_all(&self, table: Table) -> StoreResult<Vec<Record>> {
        Ok(self.lock()?.get(&table).cloned().unwrap_or_default())
    }

    fn append(&self, table: Table, record: &Record) -> StoreResult<()> {
        table.check_columns(record)?;
        self.lock()?.entry(table).or_default().push(record.clone());
        Ok(())
    }

    fn find_and_update(
        &self,
        table: Table,
        match_key: &str,
        updated_fields: &Record,
    ) -> StoreResult<bool> {
        table.check_columns(updated_fields)?;
        let mut tables = self.lock()?;
        let Some(row) = tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|row| row.matches_key(table, match_key)))
        else {
            return Ok(false);
        };

        row.merge(updated_fields);
        Ok(true)
    }

    fn delete_first(&self, table: Table, match_key: &str) -> StoreResult<bool> {
        let mut tables = self.lock()?;
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(false);
        };
        match rows.iter().position(|row| row.matches_key(table, match_key)) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryRecordStore;
    use crate::repo::record_store::{Record, RecordStore, Table};

    #[test]
    fn find_and_update_touches_first_match_only() {
        let store = MemoryRecordStore::new();
        store
            .append(Table::Jobs, &Record::new().with("id", 1_i64).with("title", "a"))
            .unwrap();
        store
            .append(Table::Jobs, &Record::new().with("id", 1_i64).with("title", "b"))
            .unwrap();

        let matched = store
            .find_and_update(Table::Jobs, "1", &Record::new().with("status", "Taken"))
            .unwrap();
        assert!(matched);

        let rows = store.read_all(Table::Jobs).unwrap();
        assert_eq!(rows[0].text("status"), "Taken");
        assert_eq!(rows[1].text("status"), "");
    }

    #[test]
    fn delete_first_reports_absence() {
        let store = MemoryRecordStore::new();
        assert!(!store.delete_first(Table::Inventory, "Lime").unwrap());

        store
            .append(Table::Inventory, &Record::new().with("item_name", "Lime"))
            .unwrap();
        assert!(store.delete_first(Table::Inventory, "Lime").unwrap());
        assert_eq!(store.row_count(Table::Inventory).unwrap(), 0);
    }
}
