//! Survey repository contract and SQLite implementation.
//!
//! # Invariants
//! - `create_survey` writes the survey row and its question batch inside one
//!   `IMMEDIATE` transaction; a failed upsert leaves no survey row behind.
//! - The merge updates `affects`, `direction` and re-affirms `survey_id` on
//!   conflict; `id` of an existing question row is preserved.
//! - Published means `name <> ''` and `description <> ''`.

use crate::db::{verify_survey_schema, DbError};
use crate::model::survey::{NewQuestion, NewSurvey, Question, Survey, SurveyId, SurveySummary};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SURVEY_SELECT_SQL: &str = "SELECT
    id,
    axis_a_name,
    axis_b_name,
    axis_a_question_count,
    axis_b_question_count,
    name,
    description,
    created_at,
    updated_at
FROM surveys";

const PUBLISHED_FILTER_SQL: &str = "name <> '' AND description <> ''";

const QUESTION_UPSERT_SQL: &str = "INSERT INTO questions (question, affects, direction, survey_id)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (question, survey_id) DO UPDATE SET
        affects = excluded.affects,
        direction = excluded.direction,
        survey_id = excluded.survey_id;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for survey storage operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A question batch targeted a survey id with no row.
    SurveyMissing(SurveyId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SurveyMissing(id) => write!(f, "survey {id} does not exist"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SurveyMissing(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for survey definitions.
pub trait SurveyRepository {
    /// Inserts one survey row and upserts its questions as a single unit of work.
    fn create_survey(
        &mut self,
        survey: &NewSurvey,
        questions: &[NewQuestion],
    ) -> RepoResult<SurveyId>;
    /// Merges a question batch into an existing survey in one transaction.
    ///
    /// Fails with `SurveyMissing` when no survey row has `survey_id`.
    fn upsert_questions(
        &mut self,
        survey_id: SurveyId,
        questions: &[NewQuestion],
    ) -> RepoResult<()>;
    /// Loads one survey with its questions.
    fn find_survey_by_id(&self, id: SurveyId) -> RepoResult<Option<Survey>>;
    /// Loads the lowest-id survey with its questions.
    fn find_any_survey(&self) -> RepoResult<Option<Survey>>;
    /// Counts published surveys.
    fn count_published(&self) -> RepoResult<i64>;
    /// Lists published surveys ordered by id.
    fn list_published(&self, limit: i64, offset: i64) -> RepoResult<Vec<SurveySummary>>;
}

/// SQLite-backed survey repository.
pub struct SqliteSurveyRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSurveyRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `Db(DbError::SchemaIncomplete)` when the schema was not migrated.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        verify_survey_schema(conn)?;
        Ok(Self { conn })
    }
}

impl SurveyRepository for SqliteSurveyRepository<'_> {
    fn create_survey(
        &mut self,
        survey: &NewSurvey,
        questions: &[NewQuestion],
    ) -> RepoResult<SurveyId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let survey_id = insert_survey(&tx, survey)?;
        upsert_question_batch(&tx, survey_id, questions)?;
        tx.commit()?;
        Ok(survey_id)
    }

    fn upsert_questions(
        &mut self,
        survey_id: SurveyId,
        questions: &[NewQuestion],
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let touched = tx.execute(
            "UPDATE surveys
             SET updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            [survey_id],
        )?;
        if touched == 0 {
            return Err(RepoError::SurveyMissing(survey_id));
        }
        upsert_question_batch(&tx, survey_id, questions)?;
        tx.commit()?;
        Ok(())
    }

    fn find_survey_by_id(&self, id: SurveyId) -> RepoResult<Option<Survey>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SURVEY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(load_survey(self.conn, row)?));
        }

        Ok(None)
    }

    fn find_any_survey(&self) -> RepoResult<Option<Survey>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SURVEY_SELECT_SQL} ORDER BY id ASC LIMIT 1;"))?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(load_survey(self.conn, row)?));
        }

        Ok(None)
    }

    fn count_published(&self) -> RepoResult<i64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM surveys WHERE {PUBLISHED_FILTER_SQL};"),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn list_published(&self, limit: i64, offset: i64) -> RepoResult<Vec<SurveySummary>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, name, description
             FROM surveys
             WHERE {PUBLISHED_FILTER_SQL}
             ORDER BY id ASC
             LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![limit, offset])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(SurveySummary {
                id: row.get("id")?,
                name: row.get("name")?,
                description: row.get("description")?,
            });
        }
        Ok(summaries)
    }
}

/// Inserts one survey row and returns the storage-assigned id.
pub fn insert_survey(tx: &Transaction<'_>, survey: &NewSurvey) -> RepoResult<SurveyId> {
    tx.execute(
        "INSERT INTO surveys (
            axis_a_name,
            axis_b_name,
            axis_a_question_count,
            axis_b_question_count,
            name,
            description
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            survey.axis_a_name.as_str(),
            survey.axis_b_name.as_str(),
            survey.axis_a_question_count,
            survey.axis_b_question_count,
            survey.name.as_str(),
            survey.description.as_str(),
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

/// Conditionally inserts or updates every question of the batch, in order.
///
/// Repeated text within one batch resolves to the last occurrence.
pub fn upsert_question_batch(
    tx: &Transaction<'_>,
    survey_id: SurveyId,
    questions: &[NewQuestion],
) -> RepoResult<()> {
    let mut stmt = tx.prepare(QUESTION_UPSERT_SQL)?;
    for question in questions {
        stmt.execute(params![
            question.text.as_str(),
            question.axis.as_str(),
            question.direction,
            survey_id,
        ])?;
    }
    Ok(())
}

fn load_survey(conn: &Connection, row: &Row<'_>) -> RepoResult<Survey> {
    let id: SurveyId = row.get("id")?;
    Ok(Survey {
        id,
        axis_a_name: row.get("axis_a_name")?,
        axis_b_name: row.get("axis_b_name")?,
        axis_a_question_count: row.get("axis_a_question_count")?,
        axis_b_question_count: row.get("axis_b_question_count")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        questions: load_questions_for_survey(conn, id)?,
    })
}

fn load_questions_for_survey(conn: &Connection, survey_id: SurveyId) -> RepoResult<Vec<Question>> {
    let mut stmt = conn.prepare(
        "SELECT id, question, affects, direction, survey_id
         FROM questions
         WHERE survey_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([survey_id])?;
    let mut questions = Vec::new();
    while let Some(row) = rows.next()? {
        questions.push(Question {
            id: row.get("id")?,
            text: row.get("question")?,
            axis: row.get("affects")?,
            direction: row.get("direction")?,
            survey_id: row.get("survey_id")?,
        });
    }
    Ok(questions)
}
