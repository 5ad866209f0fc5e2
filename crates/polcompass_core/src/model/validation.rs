//! Axis classification for submitted questions.
//!
//! Comparison is exact: axis names are neither trimmed nor case-folded.
//! Validation stops at the first question whose axis matches neither name.

use super::survey::QuestionDraft;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-axis question counts derived from a valid question set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisCounts {
    pub axis_a: u32,
    pub axis_b: u32,
}

impl AxisCounts {
    pub fn total(&self) -> u32 {
        self.axis_a + self.axis_b
    }
}

/// A question referenced an axis the survey does not declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub axis: String,
    pub axis_a_name: String,
    pub axis_b_name: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "An unknown field was added in the questions : {} fields names are : {} and {}",
            self.axis, self.axis_a_name, self.axis_b_name
        )
    }
}

impl Error for ValidationError {}

/// Counts questions per axis, failing on the first unknown axis value.
///
/// A question matching both names (when `axis_a == axis_b`) counts toward
/// axis A.
pub fn classify_questions(
    axis_a: &str,
    axis_b: &str,
    questions: &[QuestionDraft],
) -> Result<AxisCounts, ValidationError> {
    let mut counts = AxisCounts::default();
    for question in questions {
        if question.axis == axis_a {
            counts.axis_a += 1;
        } else if question.axis == axis_b {
            counts.axis_b += 1;
        } else {
            return Err(ValidationError {
                axis: question.axis.clone(),
                axis_a_name: axis_a.to_string(),
                axis_b_name: axis_b.to_string(),
            });
        }
    }
    Ok(counts)
}
