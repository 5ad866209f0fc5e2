//! JSON shapes exchanged with existing clients.
//!
//! Field names follow the published contract (`field1_name`, `Field1Name`,
//! `numberOfPages`, ...) and must not be renamed.

use polcompass_core::{CreateSurveyRequest, Question, QuestionDraft, Survey, SurveySummary};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const CREATE_KEYS: &[&str] = &[
    "field1_name",
    "field2_name",
    "name",
    "description",
    "questions",
];
const QUESTION_KEYS: &[&str] = &["ID", "question", "affects", "direction"];

/// Create payload. Absent and `null` members both decode to their default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CreateSurveyBody {
    #[serde(deserialize_with = "null_as_default")]
    pub field1_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub field2_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub questions: Vec<QuestionBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct QuestionBody {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(deserialize_with = "null_as_default")]
    pub affects: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direction: i64,
}

impl CreateSurveyBody {
    /// Decodes a create body. Member names match without regard to ASCII case
    /// (`Field1_Name`, `QUESTIONS`); an exact-case member wins over a variant.
    pub(crate) fn from_json(body: &str) -> serde_json::Result<Self> {
        let mut value: Value = serde_json::from_str(body)?;
        if let Value::Object(fields) = &mut value {
            fold_key_case(fields, CREATE_KEYS);
            if let Some(Value::Array(questions)) = fields.get_mut("questions") {
                for question in questions {
                    if let Value::Object(fields) = question {
                        fold_key_case(fields, QUESTION_KEYS);
                    }
                }
            }
        }
        serde_json::from_value(value)
    }
}

fn fold_key_case(fields: &mut Map<String, Value>, known: &[&str]) {
    for &key in known {
        if fields.contains_key(key) {
            continue;
        }
        let variant = fields
            .keys()
            .find(|candidate| candidate.eq_ignore_ascii_case(key))
            .cloned();
        if let Some(value) = variant.and_then(|variant| fields.remove(&variant)) {
            fields.insert(key.to_string(), value);
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<CreateSurveyBody> for CreateSurveyRequest {
    fn from(body: CreateSurveyBody) -> Self {
        Self {
            axis_a_name: body.field1_name,
            axis_b_name: body.field2_name,
            name: body.name,
            description: body.description,
            questions: body
                .questions
                .into_iter()
                .map(|question| QuestionDraft {
                    id: question.id,
                    text: question.question,
                    axis: question.affects,
                    direction: question.direction,
                })
                .collect(),
        }
    }
}

/// Timestamps are epoch milliseconds; `DeletedAt` is always null because
/// surveys are never deleted.
#[derive(Debug, Serialize)]
pub(crate) struct SurveyBody {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "CreatedAt")]
    pub created_at: i64,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: i64,
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<i64>,
    #[serde(rename = "Field1Name")]
    pub field1_name: String,
    #[serde(rename = "Field2Name")]
    pub field2_name: String,
    #[serde(rename = "Field1QuestionQty")]
    pub field1_question_qty: u32,
    #[serde(rename = "Field2QuestionQty")]
    pub field2_question_qty: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionView {
    #[serde(rename = "ID")]
    pub id: i64,
    pub question: String,
    pub affects: String,
    pub direction: i64,
}

impl From<Survey> for SurveyBody {
    fn from(survey: Survey) -> Self {
        Self {
            id: survey.id,
            created_at: survey.created_at,
            updated_at: survey.updated_at,
            deleted_at: None,
            field1_name: survey.axis_a_name,
            field2_name: survey.axis_b_name,
            field1_question_qty: survey.axis_a_question_count,
            field2_question_qty: survey.axis_b_question_count,
            name: survey.name,
            description: survey.description,
            questions: survey.questions.into_iter().map(QuestionView::from).collect(),
        }
    }
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            question: question.text,
            affects: question.axis,
            direction: question.direction,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SummaryResponseBody {
    #[serde(rename = "numberOfPages")]
    pub number_of_pages: i64,
    #[serde(rename = "Summaries")]
    pub summaries: Vec<SummaryBody>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SummaryBody {
    pub name: String,
    pub description: String,
    pub id: i64,
}

impl From<SurveySummary> for SummaryBody {
    fn from(summary: SurveySummary) -> Self {
        Self {
            name: summary.name,
            description: summary.description,
            id: summary.id,
        }
    }
}
