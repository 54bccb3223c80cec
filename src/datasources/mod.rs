pub mod cehub;
pub mod file;
pub mod historical;
pub mod nominatim;

pub use cehub::CeHubClient;
pub use historical::SimulatedHistory;
pub use nominatim::{Coordinates, NominatimClient};

use crate::config::{Config, WeatherSource};
use crate::error::{PlantOpsError, Result};
use crate::models::DailyWeatherRecord;
use chrono::NaiveDate;
use std::path::PathBuf;

/// What to fetch: a source, a place and an inclusive date range.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    pub source: WeatherSource,
    pub coordinates: Option<Coordinates>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub file: Option<PathBuf>,
}

/// Fetch a daily series from the requested source.
pub async fn fetch_series(
    config: &Config,
    request: &SeriesRequest,
) -> Result<Vec<DailyWeatherRecord>> {
    let located = || {
        request.coordinates.ok_or_else(|| {
            PlantOpsError::Config("A town or coordinates are required for this source".into())
        })
    };

    match request.source {
        WeatherSource::File => {
            let path = request
                .file
                .as_ref()
                .or(config.weather.file.as_ref())
                .ok_or_else(|| PlantOpsError::Config("No weather file given".into()))?;
            file::load_series(path)
        }
        WeatherSource::Forecast => {
            let cehub = config.active_cehub().ok_or_else(|| {
                PlantOpsError::DataSourceUnavailable(
                    "CE Hub forecast is not configured (cehub.api_key)".into(),
                )
            })?;
            let coords = located()?;
            CeHubClient::new(cehub.clone())
                .fetch_daily(coords.latitude, coords.longitude, request.start, request.end)
                .await
        }
        WeatherSource::Historical => {
            let coords = located()?;
            SimulatedHistory::new(config.weather.history_years).daily_averages(
                coords.latitude,
                coords.longitude,
                request.start,
                request.end,
            )
        }
    }
}
