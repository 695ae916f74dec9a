//! Pitch email generation
//!
//! A prompt template is filled in from a [`Lead`](crate::Lead) and its
//! crawled site text, sent to an OpenAI-compatible model, and the reply is
//! split into a subject and a body.

mod client;
mod prompt;

pub use client::PitchClient;
pub use prompt::{parse_pitch, Pitch, PitchRequest, PitchTemplate, DEFAULT_TEMPLATE};

use thiserror::Error;

/// Pitch generation errors
#[derive(Debug, Error)]
pub enum PitchError {
    #[error("Pitch request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pitch API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Pitch API returned no content")]
    EmptyResponse,

    #[error("Malformed pitch: {0}")]
    Malformed(String),

    #[error("Failed to read pitch template: {0}")]
    Template(#[from] std::io::Error),
}
