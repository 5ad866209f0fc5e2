//! Repository layer: the storage adapter behind survey use-cases.
//!
//! # Responsibility
//! - Define the persistence contract consumed by services.
//! - Isolate SQLite query details from orchestration.
//!
//! # Invariants
//! - Question writes are conditional inserts keyed on `(question, survey_id)`;
//!   repositories never read-then-write to merge.
//! - Repositories never validate axis membership; services do that first.

pub mod survey_repo;
