use crate::error::{PlantOpsError, Result};
use crate::models::DailyWeatherRecord;
use chrono::NaiveDate;
use rand::Rng;

/// Stand-in for a multi-year climatology over a candidate period.
///
/// Every value is drawn independently around a fixed mean, so two calls
/// return different series.
pub struct SimulatedHistory {
    years: u32,
}

impl SimulatedHistory {
    pub fn new(years: u32) -> Self {
        Self { years }
    }

    /// One record per day in `start..=end`.
    pub fn daily_averages(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyWeatherRecord>> {
        self.daily_averages_with(&mut rand::thread_rng(), latitude, longitude, start, end)
    }

    pub fn daily_averages_with<R: Rng>(
        &self,
        rng: &mut R,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyWeatherRecord>> {
        tracing::info!(
            %start,
            %end,
            latitude,
            longitude,
            years = self.years,
            "simulating historical averages"
        );

        let records: Vec<DailyWeatherRecord> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| simulate_day(rng, date))
            .collect();

        if records.is_empty() {
            return Err(PlantOpsError::UpstreamFailure(
                "Failed to retrieve historical weather data.".into(),
            ));
        }
        Ok(records)
    }
}

fn around<R: Rng>(rng: &mut R, mean: f64, spread: f64) -> f64 {
    mean + rng.gen_range(-spread..=spread)
}

fn simulate_day<R: Rng>(rng: &mut R, date: NaiveDate) -> DailyWeatherRecord {
    let tmax = around(rng, 25.0, 3.0);
    let tmin = around(rng, 15.0, 3.0);

    let mut record = DailyWeatherRecord::new(date)
        .with_temps(tmax, tmin)
        .with_average_temp((tmax + tmin) / 2.0)
        .with_rainfall(around(rng, 2.0, 1.0));
    record.humidity = Some(around(rng, 60.0, 10.0));
    record.wind_speed = Some(around(rng, 2.0, 0.5));
    record.cloudcover = Some(around(rng, 50.0, 20.0));
    record.evapotranspiration = Some(around(rng, 5.0, 1.0));
    record.soil_moisture = Some(around(rng, 30.0, 5.0));
    record.sunshine = Some(around(rng, 300.0, 50.0));
    record
}
