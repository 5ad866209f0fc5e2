//! Survey definition model.
//!
//! # Responsibility
//! - Define the records persisted for a two-axis survey and its questions.
//! - Classify submitted questions against the declared axis names.
//!
//! # Invariants
//! - Identities are storage-assigned; `0` is the zero identity, never assigned.
//! - `(question text, survey id)` is unique across persisted questions.

pub mod survey;
pub mod validation;
