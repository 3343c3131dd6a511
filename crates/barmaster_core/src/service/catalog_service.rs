//! Recipe catalog lookups.
//!
//! # Invariants
//! - Results keep sheet order; a name appearing twice is reported once (first
//!   row wins).
//! - Rows that cannot be decoded are skipped, never fatal.

use crate::model::recipe::Recipe;
use crate::repo::codec::recipe_from_record;
use crate::repo::record_store::{RecordStore, StoreResult, Table};
use log::warn;
use std::collections::HashSet;

/// Read-only catalog over the `recipes` table.
pub struct Catalog<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every recipe, in sheet order.
    pub fn all(&self) -> StoreResult<Vec<Recipe>> {
        let rows = self.store.read_all(Table::Recipes)?;
        let mut seen = HashSet::new();
        let mut recipes = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            match recipe_from_record(row) {
                Ok(recipe) => {
                    if seen.insert(recipe.name.clone()) {
                        recipes.push(recipe);
                    }
                }
                Err(err) => warn!(
                    "event=recipe_decode module=catalog status=skipped row_index={index} error={err}"
                ),
            }
        }

        Ok(recipes)
    }

    /// Case-insensitive substring search on recipe names.
    ///
    /// An empty query returns the whole catalog.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Recipe>> {
        let needle = query.to_lowercase();
        Ok(self
            .all()?
            .into_iter()
            .filter(|recipe| recipe.name_matches(&needle))
            .collect())
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> StoreResult<Option<Recipe>> {
        Ok(self.all()?.into_iter().find(|recipe| recipe.name == name))
    }
}
