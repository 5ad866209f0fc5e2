//! Guard against running survey queries on an unmigrated connection.

use super::{DbError, DbResult};
use rusqlite::Connection;

const SURVEY_COLUMNS: &[&str] = &[
    "id",
    "axis_a_name",
    "axis_b_name",
    "axis_a_question_count",
    "axis_b_question_count",
    "name",
    "description",
    "created_at",
    "updated_at",
];

const QUESTION_COLUMNS: &[&str] = &["id", "question", "affects", "direction", "survey_id"];

/// Checks that `surveys` and `questions` carry every column the repository reads.
pub fn verify_survey_schema(conn: &Connection) -> DbResult<()> {
    for (table, columns) in [("surveys", SURVEY_COLUMNS), ("questions", QUESTION_COLUMNS)] {
        let present = table_columns(conn, table)?;
        if present.is_empty() {
            return Err(DbError::SchemaIncomplete {
                table,
                column: None,
            });
        }
        if let Some(&missing) = columns
            .iter()
            .find(|column| !present.iter().any(|name| name.as_str() == **column))
        {
            return Err(DbError::SchemaIncomplete {
                table,
                column: Some(missing),
            });
        }
    }
    Ok(())
}

/// Column names of `table`; empty when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let names = stmt
        .query_map([table], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(names)
}
