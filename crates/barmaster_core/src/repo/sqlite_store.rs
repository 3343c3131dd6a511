//! SQLite-backed row store.
//!
//! # Responsibility
//! - Persist sheet rows for `recipes`, `inventory` and `jobs`.
//! - Convert between SQLite storage classes and `CellValue`.
//!
//! # Invariants
//! - The connection must come from `db::open_db*` (schema version checked in
//!   `try_new`).
//! - Key matching goes through `Table::key_matches` in Rust, so results agree
//!   with `MemoryRecordStore` and with the row decoders.

use crate::db::migrations::{current_user_version, latest_version};
use crate::repo::record_store::{CellValue, Record, RecordStore, StoreError, StoreResult, Table};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection};

/// Row store over a borrowed, migrated SQLite connection.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Wraps a connection after checking schema version and table shape.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingTable`/`MissingColumn` when the schema was tampered with.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in Table::ALL {
            ensure_table_shape(conn, table)?;
        }

        Ok(Self { conn })
    }

    /// Finds the `row_id` of the first row whose key cell matches `match_key`.
    fn locate(&self, table: Table, match_key: &str) -> StoreResult<Option<i64>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT row_id, {key} FROM {table} ORDER BY row_id;",
                key = table.key_column(),
                table = table.name()
            ))
            .map_err(|err| map_table_error(err, table))?;
        let mut rows = stmt.query([])?;

        while let Some(row) = rows.next()? {
            let key = decode_cell(row.get_ref(1)?, table, table.key_column())?;
            if table.key_matches(&key, match_key) {
                return Ok(Some(row.get(0)?));
            }
        }

        Ok(None)
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn read_all(&self, table: Table) -> StoreResult<Vec<Record>> {
        let columns = table.columns();
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM {} ORDER BY row_id;",
                columns.join(", "),
                table.name()
            ))
            .map_err(|err| map_table_error(err, table))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let mut record = Record::new();
            for (index, column) in columns.iter().enumerate() {
                let cell = decode_cell(row.get_ref(index)?, table, column)?;
                if !matches!(cell, CellValue::Empty) {
                    record.set(*column, cell);
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    fn append(&self, table: Table, record: &Record) -> StoreResult<()> {
        table.check_columns(record)?;

        if record.is_empty() {
            self.conn
                .execute(&format!("INSERT INTO {} DEFAULT VALUES;", table.name()), [])
                .map_err(|err| map_table_error(err, table))?;
            return Ok(());
        }

        let columns: Vec<&str> = record.columns().collect();
        let placeholders = (1..=columns.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let values: Vec<Value> = record.iter().map(|(_, cell)| encode_cell(cell)).collect();

        self.conn
            .execute(
                &format!(
                    "INSERT INTO {} ({}) VALUES ({placeholders});",
                    table.name(),
                    columns.join(", ")
                ),
                params_from_iter(values),
            )
            .map_err(|err| map_table_error(err, table))?;
        Ok(())
    }

    fn find_and_update(
        &self,
        table: Table,
        match_key: &str,
        updated_fields: &Record,
    ) -> StoreResult<bool> {
        table.check_columns(updated_fields)?;

        let tx = self.conn.unchecked_transaction()?;
        let Some(row_id) = self.locate(table, match_key)? else {
            return Ok(false);
        };

        if !updated_fields.is_empty() {
            let assignments = updated_fields
                .columns()
                .enumerate()
                .map(|(index, column)| format!("{column} = ?{}", index + 1))
                .collect::<Vec<_>>()
                .join(", ");
            let mut values: Vec<Value> = updated_fields
                .iter()
                .map(|(_, cell)| encode_cell(cell))
                .collect();
            let row_param = values.len() + 1;
            values.push(Value::Integer(row_id));

            tx.execute(
                &format!(
                    "UPDATE {} SET {assignments} WHERE row_id = ?{row_param};",
                    table.name()
                ),
                params_from_iter(values),
            )?;
        }

        tx.commit()?;
        Ok(true)
    }

    fn delete_first(&self, table: Table, match_key: &str) -> StoreResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(row_id) = self.locate(table, match_key)? else {
            return Ok(false);
        };

        tx.execute(
            &format!("DELETE FROM {} WHERE row_id = ?1;", table.name()),
            [row_id],
        )?;
        tx.commit()?;
        Ok(true)
    }
}

fn ensure_table_shape(conn: &Connection, table: Table) -> StoreResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table.name()))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    if present.is_empty() {
        return Err(StoreError::MissingTable(table.name()));
    }

    for &column in table.columns() {
        if !present.iter().any(|name| name == column) {
            return Err(StoreError::MissingColumn {
                table: table.name(),
                column,
            });
        }
    }

    Ok(())
}

fn decode_cell(value: ValueRef<'_>, table: Table, column: &str) -> StoreResult<CellValue> {
    match value {
        ValueRef::Null => Ok(CellValue::Empty),
        ValueRef::Integer(value) => Ok(CellValue::Integer(value)),
        ValueRef::Real(value) => Ok(CellValue::Number(value)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| CellValue::Text(text.to_string()))
            .map_err(|_| {
                StoreError::InvalidData(format!("non UTF-8 text in {table}.{column}"))
            }),
        ValueRef::Blob(_) => Err(StoreError::InvalidData(format!(
            "unexpected blob in {table}.{column}"
        ))),
    }
}

fn encode_cell(cell: &CellValue) -> Value {
    match cell {
        CellValue::Empty => Value::Null,
        CellValue::Integer(value) => Value::Integer(*value),
        CellValue::Number(value) => Value::Real(*value),
        CellValue::Text(text) => Value::Text(text.clone()),
    }
}

fn map_table_error(err: rusqlite::Error, table: Table) -> StoreError {
    if let rusqlite::Error::SqliteFailure(_, Some(message)) = &err {
        if message.contains("no such table") {
            return StoreError::MissingTable(table.name());
        }
    }
    StoreError::from(err)
}
