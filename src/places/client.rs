//! HTTP client for the places directory
//!
//! Three endpoints are used: geocoding (location name to coordinates),
//! nearby search (paged keyword search around a point) and place details
//! (phone, website and address of one place).

use crate::config::PlacesConfig;
use crate::lead::Lead;
use crate::places::types::{
    GeocodeResponse, LatLng, NearbyPage, NearbySearchResponse, PlaceDetails,
    PlaceDetailsResponse, PlaceSummary, STATUS_OK, STATUS_ZERO_RESULTS,
};
use crate::places::PlacesError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;

/// Per-request timeout for directory calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fields requested from the details endpoint
const DETAIL_FIELDS: &str = "name,formatted_phone_number,website,formatted_address";

/// Client for the geocoding, nearby search and place details endpoints
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    search_radius: u32,
    page_token_delay: Duration,
}

impl PlacesClient {
    /// Creates a client from configuration and a resolved API key
    pub fn new(config: &PlacesConfig, api_key: impl Into<String>) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_radius: config.search_radius,
            page_token_delay: Duration::from_millis(config.page_token_delay),
        })
    }

    /// Resolves a location name to coordinates
    ///
    /// Returns `PlacesError::Status` when the provider reports anything but
    /// `OK`, and `PlacesError::NoResults` when it reports `OK` with nothing
    /// in it.
    pub async fn geocode(&self, location: &str) -> Result<LatLng, PlacesError> {
        let response: GeocodeResponse = self
            .get_json("geocode/json", &[("address", location.to_string())])
            .await?;

        if response.status != STATUS_OK {
            return Err(status_error(
                format!("geocoding {}", location),
                response.status,
                response.error_message,
            ));
        }

        response
            .results
            .first()
            .map(|result| result.geometry.location)
            .ok_or_else(|| PlacesError::NoResults(location.to_string()))
    }

    /// Fetches one page of nearby-search results
    ///
    /// When `page_token` is given, the configured page-token delay is
    /// observed first; the provider rejects tokens used too early.
    /// `ZERO_RESULTS` is an empty page.
    pub async fn nearby_search(
        &self,
        location: LatLng,
        keyword: &str,
        page_token: Option<&str>,
    ) -> Result<NearbyPage, PlacesError> {
        let mut params = vec![
            ("location", format!("{},{}", location.lat, location.lng)),
            ("radius", self.search_radius.to_string()),
            ("keyword", keyword.to_string()),
        ];

        if let Some(token) = page_token {
            tokio::time::sleep(self.page_token_delay).await;
            params.push(("pagetoken", token.to_string()));
        }

        let response: NearbySearchResponse =
            self.get_json("place/nearbysearch/json", &params).await?;

        match response.status.as_str() {
            STATUS_OK => Ok(NearbyPage {
                results: response.results,
                next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
            }),
            STATUS_ZERO_RESULTS => Ok(NearbyPage::default()),
            _ => Err(status_error(
                format!("nearby search for {}", keyword),
                response.status,
                response.error_message,
            )),
        }
    }

    /// Fetches phone, website and address of one place
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let response: PlaceDetailsResponse = self
            .get_json(
                "place/details/json",
                &[
                    ("place_id", place_id.to_string()),
                    ("fields", DETAIL_FIELDS.to_string()),
                ],
            )
            .await?;

        if response.status != STATUS_OK {
            return Err(status_error(
                format!("details for {}", place_id),
                response.status,
                response.error_message,
            ));
        }

        Ok(response.result.unwrap_or_default())
    }

    /// Finds businesses matching `niche` around each location
    ///
    /// # Process
    ///
    /// 1. Geocode each location
    /// 2. Page through nearby search, at most `max_pages` pages per location
    /// 3. Drop repeated place ids (first occurrence wins, order preserved)
    /// 4. Fetch details for each place
    ///
    /// Geocoding and search failures abort the call. A details failure only
    /// degrades that lead to the fields the search result carried.
    pub async fn get_leads(
        &self,
        niche: &str,
        locations: &[String],
        max_pages: u32,
    ) -> Result<Vec<Lead>, PlacesError> {
        let mut hits: Vec<(String, PlaceSummary)> = Vec::new();

        for city in locations {
            let point = self.geocode(city).await?;
            tracing::debug!("Geocoded {} to {},{}", city, point.lat, point.lng);

            let mut token: Option<String> = None;
            for page_number in 0..max_pages {
                let page = self.nearby_search(point, niche, token.as_deref()).await?;
                tracing::debug!(
                    "Nearby search in {} page {}: {} result(s)",
                    city,
                    page_number,
                    page.results.len()
                );

                hits.extend(page.results.into_iter().map(|hit| (city.clone(), hit)));

                token = page.next_page_token;
                if token.is_none() {
                    break;
                }
            }
        }

        let mut seen = HashSet::new();
        let unique: Vec<(String, String, PlaceSummary)> = hits
            .into_iter()
            .filter_map(|(city, hit)| {
                let place_id = hit.place_id.clone().filter(|id| !id.is_empty())?;
                seen.insert(place_id.clone()).then_some((city, place_id, hit))
            })
            .collect();

        let mut leads = Vec::with_capacity(unique.len());
        for (city, place_id, hit) in unique {
            let details = match self.place_details(&place_id).await {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!("Falling back to search fields for {}: {}", place_id, e);
                    PlaceDetails::default()
                }
            };
            leads.push(build_lead(city, place_id, hit, details));
        }

        tracing::info!("Found {} unique lead(s) for {:?}", leads.len(), niche);
        Ok(leads)
    }

    /// Sends a GET to `{base_url}/{endpoint}` with the API key attached
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Merges search and detail fields; details win where both are present
fn build_lead(city: String, place_id: String, hit: PlaceSummary, details: PlaceDetails) -> Lead {
    Lead {
        name: non_empty(details.name)
            .or_else(|| non_empty(hit.name))
            .unwrap_or_default(),
        phone: non_empty(details.formatted_phone_number),
        address: non_empty(details.formatted_address).or_else(|| non_empty(hit.vicinity)),
        website: non_empty(details.website),
        email: None,
        place_id,
        city,
        review_count: hit.user_ratings_total,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn status_error(context: String, status: String, message: Option<String>) -> PlacesError {
    if let Some(message) = message {
        tracing::warn!("Places API {} returned {}: {}", context, status, message);
    }
    PlacesError::Status { context, status }
}
