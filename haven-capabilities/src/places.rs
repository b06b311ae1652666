//! Geocoding and places lookup.
//!
//! [`PlacesBackend`] is the seam the therapist finder talks to;
//! [`GoogleMaps`] implements it against the Google Maps web services.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Google Maps API base URL.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Errors from a places backend.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP or network request failed.
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The API answered with an error status (e.g. `REQUEST_DENIED`).
    #[error("{status}: {message}")]
    Api {
        /// API status string.
        status: String,
        /// Error message, if any.
        message: String,
    },

    /// The response could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// A nearby place. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Backend identifier used for detail lookups.
    pub place_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Short address.
    pub address: Option<String>,
}

/// Geocoding + nearby search + phone lookup.
#[async_trait]
pub trait PlacesBackend: Send + Sync {
    /// Resolve a free-text location; empty when nothing matches.
    async fn geocode(&self, location: &str) -> Result<Vec<GeoPoint>, LookupError>;

    /// Places matching `keyword` within `radius_m` metres of `center`,
    /// in relevance order.
    async fn nearby(
        &self,
        center: GeoPoint,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Place>, LookupError>;

    /// Phone number of a place, if it has one.
    async fn phone_number(&self, place_id: &str) -> Result<Option<String>, LookupError>;
}

/// Client for the Google Maps Geocoding and Places APIs.
///
/// # Example
///
/// ```no_run
/// use haven_capabilities::GoogleMaps;
///
/// let maps = GoogleMaps::new("AIza...").base_url("https://maps.googleapis.com");
/// ```
pub struct GoogleMaps {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleMaps {
    /// Create a client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (tests, proxies).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, LookupError> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "sending maps request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| LookupError::InvalidResponse(format!("invalid JSON: {e}")))?;
        check_api_status(&json)?;
        Ok(json)
    }
}

/// `OK` and `ZERO_RESULTS` are successes; anything else is an API error.
fn check_api_status(json: &serde_json::Value) -> Result<(), LookupError> {
    match json["status"].as_str() {
        None | Some("OK") | Some("ZERO_RESULTS") => Ok(()),
        Some(other) => Err(LookupError::Api {
            status: other.to_string(),
            message: json["error_message"].as_str().unwrap_or_default().to_string(),
        }),
    }
}

fn parse_geocode(json: &serde_json::Value) -> Result<Vec<GeoPoint>, LookupError> {
    let Some(results) = json["results"].as_array() else {
        return Ok(vec![]);
    };
    results
        .iter()
        .map(|r| {
            let loc = &r["geometry"]["location"];
            match (loc["lat"].as_f64(), loc["lng"].as_f64()) {
                (Some(lat), Some(lng)) => Ok(GeoPoint { lat, lng }),
                _ => Err(LookupError::InvalidResponse(
                    "geocode result without coordinates".into(),
                )),
            }
        })
        .collect()
}

fn parse_places(json: &serde_json::Value) -> Vec<Place> {
    json["results"]
        .as_array()
        .map(|results| {
            results
                .iter()
                .map(|r| Place {
                    place_id: r["place_id"].as_str().map(String::from),
                    name: r["name"].as_str().map(String::from),
                    address: r["vicinity"].as_str().map(String::from),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl PlacesBackend for GoogleMaps {
    async fn geocode(&self, location: &str) -> Result<Vec<GeoPoint>, LookupError> {
        let json = self
            .get_json("/maps/api/geocode/json", &[("address", location)])
            .await?;
        parse_geocode(&json)
    }

    async fn nearby(
        &self,
        center: GeoPoint,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Place>, LookupError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_m.to_string();
        let json = self
            .get_json(
                "/maps/api/place/nearbysearch/json",
                &[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("keyword", keyword),
                ],
            )
            .await?;
        Ok(parse_places(&json))
    }

    async fn phone_number(&self, place_id: &str) -> Result<Option<String>, LookupError> {
        let json = self
            .get_json(
                "/maps/api/place/details/json",
                &[("place_id", place_id), ("fields", "formatted_phone_number")],
            )
            .await?;
        Ok(json["result"]["formatted_phone_number"]
            .as_str()
            .map(String::from))
    }
}
