//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into survey use-cases.
//! - Keep transport layers decoupled from storage details.

pub mod directory_service;
pub mod error;
pub mod survey_service;
