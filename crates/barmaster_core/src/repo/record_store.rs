//! Row-store contract shared by all backing stores.
//!
//! # Invariants
//! - `read_all` returns rows in insertion order.
//! - `find_and_update` and `delete_first` touch at most one row: the first one
//!   whose key cell matches `match_key` under `Table::canonical_key`.
//! - Writes naming a column outside `Table::columns()` are rejected before the
//!   backend is touched.

use crate::db::DbError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Logical tables (sheet tabs) known to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    Recipes,
    Inventory,
    Jobs,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Recipes, Table::Inventory, Table::Jobs];

    /// Stable table/tab name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Recipes => "recipes",
            Self::Inventory => "inventory",
            Self::Jobs => "jobs",
        }
    }

    /// Column header row, in sheet order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Recipes => &["name", "ingredients"],
            Self::Inventory => &["item_name"],
            Self::Jobs => &[
                "id", "title", "date", "location", "budget", "status", "taker",
            ],
        }
    }

    /// Column used by `find_and_update`/`delete_first` to locate a row.
    pub fn key_column(self) -> &'static str {
        match self {
            Self::Recipes => "name",
            Self::Inventory => "item_name",
            Self::Jobs => "id",
        }
    }

    /// Canonical form of a key cell, shared by row lookup and decoding.
    ///
    /// Job ids compare by their numeric value (`" 101 "`, `101` and `101.0`
    /// are the same job); other keys compare as trimmed text.
    pub fn canonical_key(self, cell: &CellValue) -> String {
        match (self, cell.as_id()) {
            (Self::Jobs, Some(id)) => id.to_string(),
            _ => cell.to_text().trim().to_string(),
        }
    }

    /// Whether a stored key cell refers to the same row as `match_key`.
    pub fn key_matches(self, cell: &CellValue, match_key: &str) -> bool {
        self.canonical_key(cell) == self.canonical_key(&CellValue::from(match_key))
    }

    /// Rejects records that name columns this table does not have.
    pub fn check_columns(self, record: &Record) -> StoreResult<()> {
        match record
            .columns()
            .find(|column| !self.columns().iter().any(|known| known == column))
        {
            Some(column) => Err(StoreError::UnknownColumn {
                table: self.name(),
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Renders the cell the way a sheet shows it; used for key matching.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Integer(value) => value.to_string(),
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                (*value as i64).to_string()
            }
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }

    /// Non-negative integral cell read as an id; text is trimmed first.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            Self::Integer(value) => u64::try_from(*value).ok(),
            Self::Number(value) if value.fract() == 0.0 && *value >= 0.0 && *value < 1e15 => {
                Some(*value as u64)
            }
            Self::Text(text) => text.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// One sheet row: column name to cell. Absent columns read as `Empty`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    cells: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell assignment.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// Cell text, empty for missing cells.
    pub fn text(&self, column: &str) -> String {
        self.get(column).to_text()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(column, value)| (column.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Overwrites the cells named in `fields`, leaving the rest untouched.
    pub fn merge(&mut self, fields: &Record) {
        for (column, value) in fields.iter() {
            self.set(column, value.clone());
        }
    }

    /// Whether the key cell of `table` matches `match_key` (see
    /// [`Table::canonical_key`]).
    pub fn matches_key(&self, table: Table, match_key: &str) -> bool {
        table.key_matches(self.get(table.key_column()), match_key)
    }
}

/// Persistence failure taxonomy for row stores.
#[derive(Debug)]
pub enum StoreError {
    /// Backing store cannot be reached or locked.
    Unavailable(String),
    /// Connection was not bootstrapped through `db::open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingTable(&'static str),
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    UnknownColumn {
        table: &'static str,
        column: String,
    },
    /// A stored cell cannot be decoded into the domain shape.
    InvalidData(String),
    Db(DbError),
}

impl StoreError {
    /// Whether the backing store itself is unreachable (as opposed to a data
    /// or schema problem).
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Db(err) => err.is_unavailable(),
            _ => false,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "backing store unavailable: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingTable(table) => write!(f, "table not found: {table}"),
            Self::MissingColumn { table, column } => {
                write!(f, "table `{table}` is missing column `{column}`")
            }
            Self::UnknownColumn { table, column } => {
                write!(f, "table `{table}` has no column `{column}`")
            }
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Row-level access to the backing sheet.
///
/// Implementations do no conflict detection: concurrent writers race and
/// the last write wins.
pub trait RecordStore {
    /// All rows of `table`, in insertion order.
    fn read_all(&self, table: Table) -> StoreResult<Vec<Record>>;

    /// Appends one row at the end of `table`.
    fn append(&self, table: Table, record: &Record) -> StoreResult<()>;

    /// Overwrites `updated_fields` on the first row whose key matches.
    ///
    /// Returns `false` when no row matched.
    fn find_and_update(
        &self,
        table: Table,
        match_key: &str,
        updated_fields: &Record,
    ) -> StoreResult<bool>;

    /// Removes the first row whose key matches. Returns whether one was removed.
    fn delete_first(&self, table: Table, match_key: &str) -> StoreResult<bool>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn read_all(&self, table: Table) -> StoreResult<Vec<Record>> {
        (**self).read_all(table)
    }

    fn append(&self, table: Table, record: &Record) -> StoreResult<()> {
        (**self).append(table, record)
    }

    fn find_and_update(
        &self,
        table: Table,
        match_key: &str,
        updated_fields: &Record,
    ) -> StoreResult<bool> {
        (**self).find_and_update(table, match_key, updated_fields)
    }

    fn delete_first(&self, table: Table, match_key: &str) -> StoreResult<bool> {
        (**self).delete_first(table, match_key)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, Record, StoreError, Table};

    #[test]
    fn cell_text_matches_sheet_rendering() {
        assert_eq!(CellValue::Integer(101).to_text(), "101");
        assert_eq!(CellValue::Number(101.0).to_text(), "101");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Empty.to_text(), "");
    }

    #[test]
    fn missing_cells_read_as_empty() {
        let record = Record::new().with("id", 101_i64);
        assert_eq!(record.get("taker"), &CellValue::Empty);
        assert!(record.matches_key(Table::Jobs, "101"));
        assert!(!record.matches_key(Table::Jobs, "102"));
    }

    #[test]
    fn key_matching_uses_decoded_form() {
        let job = Record::new().with("id", " 101 ");
        assert!(job.matches_key(Table::Jobs, "101"));
        assert!(Record::new().with("id", 101.0).matches_key(Table::Jobs, "101"));
        assert!(!job.matches_key(Table::Jobs, "10"));

        let item = Record::new().with("item_name", "Lime ");
        assert!(item.matches_key(Table::Inventory, "Lime"));
        assert!(!item.matches_key(Table::Inventory, "lime"));
    }

    #[test]
    fn check_columns_rejects_foreign_columns() {
        let record = Record::new().with("item_name", "Lime").with("price", 3_i64);
        let err = Table::Inventory.check_columns(&record).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnknownColumn { table: "inventory", ref column } if column == "price"
        ));
    }

    #[test]
    fn merge_overwrites_only_named_cells() {
        let mut row = Record::new()
            .with("id", 5_i64)
            .with("status", "Open")
            .with("title", "Pop-up");
        row.merge(&Record::new().with("status", "Taken").with("taker", "leo"));
        assert_eq!(row.text("status"), "Taken");
        assert_eq!(row.text("taker"), "leo");
        assert_eq!(row.text("title"), "Pop-up");
    }
}
