//! Lead record
//!
//! A lead is one business found through the places directory, optionally
//! enriched with an email address taken from its website.

use serde::Serialize;

/// Prefix of a Google Maps link addressed by place id
const MAPS_PLACE_PREFIX: &str = "https://www.google.com/maps/place/?q=place_id:";

/// A business that may be contacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub place_id: String,
    /// Location the lead was searched in
    pub city: String,
    pub review_count: Option<u32>,
}

impl Lead {
    /// Creates a lead with only the directory identity filled in
    pub fn new(name: impl Into<String>, place_id: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            address: None,
            website: None,
            email: None,
            place_id: place_id.into(),
            city: city.into(),
            review_count: None,
        }
    }

    /// Google Maps link for this place
    pub fn maps_url(&self) -> String {
        format!("{}{}", MAPS_PLACE_PREFIX, self.place_id)
    }

    /// Returns true if the lead has a website but no email yet
    pub fn needs_email(&self) -> bool {
        self.email.is_none() && self.website.is_some()
    }

    /// JSON form of the lead, including the derived maps link
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = serde_json::json!(self);
        if let Some(map) = value.as_object_mut() {
            map.insert("maps_url".to_string(), self.maps_url().into());
        }
        value
    }
}
