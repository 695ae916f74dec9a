//! Wire types for the places and geocoding endpoints
//!
//! Every field is defaulted so that partial responses deserialize; status
//! checks happen in the client.

use serde::Deserialize;

/// Status string of a successful request
pub const STATUS_OK: &str = "OK";

/// Status string of a search that matched nothing
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResponse {
    pub status: String,
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NearbySearchResponse {
    pub status: String,
    pub results: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

/// One nearby-search hit
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaceSummary {
    pub place_id: Option<String>,
    pub name: Option<String>,
    /// Short address
    pub vicinity: Option<String>,
    pub user_ratings_total: Option<u32>,
}

/// One page of nearby-search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyPage {
    pub results: Vec<PlaceSummary>,
    /// Token for the following page, if any
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetails>,
    pub error_message: Option<String>,
}

/// Contact details of one place
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub formatted_address: Option<String>,
}
