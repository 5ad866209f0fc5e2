use polcompass_core::db::migrations::latest_version;
use polcompass_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "surveys");
    assert_table_exists(&conn, "questions");
    assert_index_exists(&conn, "idx_surveys_published");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("polcompass.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO surveys (axis_a_name, axis_b_name, name, description)
             VALUES ('Economic', 'Social', 'Kept', 'Across reopen');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let surveys: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM surveys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(surveys, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn question_text_is_unique_per_survey_at_schema_level() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO surveys (name) VALUES ('a');", [])
        .unwrap();
    conn.execute(
        "INSERT INTO questions (question, affects, direction, survey_id)
         VALUES ('Q1', 'Economic', 1, 1);",
        [],
    )
    .unwrap();

    let duplicate = conn.execute(
        "INSERT INTO questions (question, affects, direction, survey_id)
         VALUES ('Q1', 'Social', 2, 1);",
        [],
    );
    assert!(duplicate.is_err());
}

#[test]
fn questions_require_an_owning_survey() {
    let conn = open_db_in_memory().unwrap();
    let orphan = conn.execute(
        "INSERT INTO questions (question, affects, direction, survey_id)
         VALUES ('Q1', 'Economic', 1, 77);",
        [],
    );
    assert!(orphan.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert!(
        schema_object_exists(conn, "table", table_name),
        "table {table_name} does not exist"
    );
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    assert!(
        schema_object_exists(conn, "index", index_name),
        "index {index_name} does not exist"
    );
}

fn schema_object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    exists == 1
}
