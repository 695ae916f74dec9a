//! Places directory integration
//!
//! Turns a niche and a list of locations into [`Lead`](crate::Lead) records.

mod client;
mod types;

pub use client::PlacesClient;
pub use types::{LatLng, NearbyPage, PlaceDetails, PlaceSummary};

use thiserror::Error;

/// Places API errors
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Places API {context} failed with status {status}")]
    Status { context: String, status: String },

    #[error("Places API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No results for {0}")]
    NoResults(String),
}
