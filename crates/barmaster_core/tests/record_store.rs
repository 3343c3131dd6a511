use barmaster_core::db::migrations::latest_version;
use barmaster_core::db::{open_db, open_db_in_memory};
use barmaster_core::{
    CellValue, MemoryRecordStore, Record, RecordStore, SqliteRecordStore, StoreError, Table,
};
use rusqlite::Connection;

fn job_row(id: i64, title: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("title", title)
        .with("status", "Open")
}

/// Behaviour every backend must share.
fn exercise_contract(store: &impl RecordStore) {
    store.append(Table::Jobs, &job_row(101, "first")).unwrap();
    store.append(Table::Jobs, &job_row(102, "second")).unwrap();
    store
        .append(Table::Jobs, &Record::new().with("id", "103").with("budget", 2.5))
        .unwrap();

    let rows = store.read_all(Table::Jobs).unwrap();
    let titles: Vec<_> = rows.iter().map(|row| row.text("title")).collect();
    assert_eq!(titles, vec!["first", "second", ""]);
    assert_eq!(rows[0].get("id"), &CellValue::Integer(101));
    assert_eq!(rows[2].get("id"), &CellValue::Text("103".to_string()));
    assert_eq!(rows[2].get("budget"), &CellValue::Number(2.5));

    let matched = store
        .find_and_update(
            Table::Jobs,
            "102",
            &Record::new().with("status", "Taken").with("taker", "leo"),
        )
        .unwrap();
    assert!(matched);
    let rows = store.read_all(Table::Jobs).unwrap();
    assert_eq!(rows[1].text("status"), "Taken");
    assert_eq!(rows[1].text("taker"), "leo");
    assert_eq!(rows[1].text("title"), "second");
    assert_eq!(rows[0].text("status"), "Open");

    // Text and integer keys are matched through their rendered text.
    assert!(store
        .find_and_update(Table::Jobs, "103", &Record::new().with("title", "third"))
        .unwrap());
    assert!(!store
        .find_and_update(Table::Jobs, "999", &Record::new().with("title", "x"))
        .unwrap());

    assert!(store.delete_first(Table::Jobs, "101").unwrap());
    assert!(!store.delete_first(Table::Jobs, "101").unwrap());
    assert_eq!(store.read_all(Table::Jobs).unwrap().len(), 2);

    let err = store
        .append(Table::Inventory, &Record::new().with("price", 3_i64))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownColumn { table: "inventory", .. }));
    let err = store
        .find_and_update(Table::Jobs, "102", &Record::new().with("owner", "x"))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownColumn { table: "jobs", .. }));
}

#[test]
fn memory_store_honours_row_contract() {
    exercise_contract(&MemoryRecordStore::new());
}

#[test]
fn sqlite_store_honours_row_contract() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    exercise_contract(&store);
}

#[test]
fn sqlite_rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bar.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteRecordStore::try_new(&conn).unwrap();
        store
            .append(Table::Inventory, &Record::new().with("item_name", "Gin"))
            .unwrap();
        store
            .append(Table::Inventory, &Record::new().with("item_name", "Tonic"))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let names: Vec<_> = store
        .read_all(Table::Inventory)
        .unwrap()
        .iter()
        .map(|row| row.text("item_name"))
        .collect();
    assert_eq!(names, vec!["Gin", "Tonic"]);
}

#[test]
fn sqlite_store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRecordStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn sqlite_store_rejects_missing_table_and_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();
    assert!(matches!(
        SqliteRecordStore::try_new(&conn),
        Err(StoreError::MissingTable("recipes"))
    ));

    conn.execute_batch(
        "CREATE TABLE recipes (row_id INTEGER PRIMARY KEY, name, ingredients);
         CREATE TABLE inventory (row_id INTEGER PRIMARY KEY, item_name);
         CREATE TABLE jobs (row_id INTEGER PRIMARY KEY, id, title, date, location, budget, status);",
    )
    .unwrap();
    assert!(matches!(
        SqliteRecordStore::try_new(&conn),
        Err(StoreError::MissingColumn {
            table: "jobs",
            column: "taker"
        })
    ));
}

#[test]
fn dropped_table_reads_as_missing_table() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE inventory;").unwrap();

    let err = store.read_all(Table::Inventory).unwrap_err();
    assert!(matches!(err, StoreError::MissingTable("inventory")));
    assert!(!err.is_unavailable());
}
