//! Survey store bootstrap.
//!
//! Connections handed out by [`open_db`]/[`open_db_in_memory`] are migrated to
//! [`migrations::latest_version`]. Repositories built on connections from
//! elsewhere call [`verify_survey_schema`] first.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::verify_survey_schema;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer binary.
    SchemaTooNew { found: u32, supported: u32 },
    /// A table (or one of its columns) the survey store needs is absent.
    SchemaIncomplete {
        table: &'static str,
        column: Option<&'static str>,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "survey schema v{found} needs a newer binary (supported up to v{supported})"
            ),
            Self::SchemaIncomplete {
                table,
                column: None,
            } => write!(f, "survey schema has no `{table}` table"),
            Self::SchemaIncomplete {
                table,
                column: Some(column),
            } => write!(f, "survey schema table `{table}` has no `{column}` column"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::SchemaIncomplete { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
