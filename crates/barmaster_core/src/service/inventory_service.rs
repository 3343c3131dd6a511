//! Bar inventory: a set of ingredient names in insertion order.
//!
//! # Invariants
//! - Names are trimmed; blank names are rejected.
//! - `add` never creates a duplicate; `list` never reports one even if the
//!   backing sheet was edited by hand.

use crate::repo::codec::{inventory_from_record, inventory_to_record};
use crate::repo::record_store::{RecordStore, StoreError, Table};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug)]
pub enum InventoryError {
    EmptyName,
    Store(StoreError),
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name cannot be empty"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::EmptyName => None,
        }
    }
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Inventory set backed by the `inventory` table.
pub struct Inventory<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Inventory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current members, insertion order, deduplicated.
    pub fn list(&self) -> InventoryResult<Vec<String>> {
        let mut items: Vec<String> = Vec::new();
        for name in self
            .store
            .read_all(Table::Inventory)?
            .iter()
            .filter_map(inventory_from_record)
        {
            if !items.contains(&name) {
                items.push(name);
            }
        }
        Ok(items)
    }

    pub fn contains(&self, name: &str) -> InventoryResult<bool> {
        let name = normalize_name(name)?;
        Ok(self.list()?.iter().any(|item| item == name))
    }

    /// Inserts `name` unless present. Returns whether a row was written.
    pub fn add(&self, name: &str) -> InventoryResult<bool> {
        let name = normalize_name(name)?;
        if self.list()?.iter().any(|item| item == name) {
            info!("event=inventory_add module=inventory status=noop reason=duplicate");
            return Ok(false);
        }

        self.store.append(Table::Inventory, &inventory_to_record(name))?;
        info!("event=inventory_add module=inventory status=ok");
        Ok(true)
    }

    /// Deletes `name` if present. Returns whether a row was removed.
    ///
    /// Hand-entered duplicate rows are removed too, so the name is gone from
    /// later listings.
    pub fn remove(&self, name: &str) -> InventoryResult<bool> {
        let name = normalize_name(name)?;
        let mut removed = false;
        while self.store.delete_first(Table::Inventory, name)? {
            removed = true;
        }
        info!(
            "event=inventory_remove module=inventory status={}",
            if removed { "ok" } else { "noop" }
        );
        Ok(removed)
    }
}

fn normalize_name(name: &str) -> InventoryResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::EmptyName);
    }
    Ok(trimmed)
}
