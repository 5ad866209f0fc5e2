//! Transport-facing request handlers for survey definitions.
//!
//! Routing, CORS and server lifecycle belong to the embedding process; this
//! crate only turns raw request parts into status + JSON envelopes.

pub mod api;
mod wire;

pub use api::{
    create_survey, first_survey, get_survey, list_summaries, ping, ApiError, ApiResponse,
};
