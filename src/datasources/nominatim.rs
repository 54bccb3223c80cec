use crate::config::GeocoderConfig;
use crate::error::{PlantOpsError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Town name to coordinates via a Nominatim search endpoint.
pub struct NominatimClient {
    client: reqwest::Client,
    config: GeocoderConfig,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl NominatimClient {
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub async fn geocode(&self, town: &str) -> Result<Coordinates> {
        let url = search_url(&self.config.url, town)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlantOpsError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            return Err(PlantOpsError::DataSourceUnavailable(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        let places: Vec<Place> = response.json().await.map_err(|e| {
            PlantOpsError::DataSourceUnavailable(format!(
                "Failed to parse Nominatim response: {}",
                e
            ))
        })?;

        let coords = first_coordinates(town, places)?;
        tracing::info!(
            town,
            latitude = coords.latitude,
            longitude = coords.longitude,
            "geocoded"
        );
        Ok(coords)
    }
}

fn search_url(base: &str, town: &str) -> Result<reqwest::Url> {
    let url = format!("{}/search", base.trim_end_matches('/'));
    reqwest::Url::parse_with_params(&url, &[("format", "json"), ("limit", "1"), ("q", town)])
        .map_err(|e| PlantOpsError::Config(format!("Invalid geocoder URL: {}", e)))
}

fn first_coordinates(town: &str, places: Vec<Place>) -> Result<Coordinates> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| PlantOpsError::LocationNotFound(town.to_string()))?;

    if let Some(name) = &place.display_name {
        tracing::debug!(name = %name, "geocoder match");
    }

    match (place.lat.parse::<f64>(), place.lon.parse::<f64>()) {
        (Ok(latitude), Ok(longitude)) => Ok(Coordinates {
            latitude,
            longitude,
        }),
        _ => Err(PlantOpsError::InvalidData(format!(
            "Nominatim returned unreadable coordinates for '{}'",
            town
        ))),
    }
}
