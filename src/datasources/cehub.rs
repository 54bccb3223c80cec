use crate::config::CeHubConfig;
use crate::error::{PlantOpsError, Result};
use crate::models::{sort_by_date, DailyWeatherRecord, MEASURE_LABELS};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;

const FORECAST_PATH: &str = "/api/Forecast/ShortRangeForecastDaily";
const ROW_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// CE Hub short-range daily forecast client.
pub struct CeHubClient {
    client: reqwest::Client,
    config: CeHubConfig,
}

// One value for one measure on one day
#[derive(Debug, Deserialize)]
struct CeHubRow {
    date: Option<String>,
    #[serde(rename = "measureLabel")]
    measure_label: Option<String>,
    #[serde(rename = "dailyValue", default)]
    daily_value: Option<serde_json::Value>,
}

impl CeHubClient {
    pub fn new(config: CeHubConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), FORECAST_PATH)
    }

    fn request_url(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<reqwest::Url> {
        reqwest::Url::parse_with_params(
            &self.forecast_url(),
            self.query(latitude, longitude, start, end),
        )
        .map_err(|e| PlantOpsError::Config(format!("Invalid CE Hub base URL: {}", e)))
    }

    fn query(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("supplier", self.config.supplier.clone()),
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
            ("measureLabel", MEASURE_LABELS.join(";")),
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("ApiKey", self.config.api_key.clone()),
        ]
    }

    /// Fetch daily records for `start..=end`, merged from per-measure rows.
    pub async fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyWeatherRecord>> {
        tracing::info!(%start, %end, latitude, longitude, "fetching CE Hub forecast");

        let url = self.request_url(latitude, longitude, start, end)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlantOpsError::DataSourceUnavailable(format!("CE Hub: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlantOpsError::DataSourceUnavailable(format!(
                "CE Hub returned {}: {}",
                status, body
            )));
        }

        let rows: Vec<CeHubRow> = response.json().await.map_err(|e| {
            PlantOpsError::DataSourceUnavailable(format!(
                "Failed to parse CE Hub response: {}",
                e
            ))
        })?;

        let records = merge_rows(rows);
        if records.is_empty() {
            return Err(PlantOpsError::UpstreamFailure(
                "Failed to retrieve forecast data.".into(),
            ));
        }
        tracing::debug!(days = records.len(), "CE Hub forecast merged");
        Ok(records)
    }

    /// Test connection with a one-day request
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let today = chrono::Local::now().date_naive();
        let url = self.request_url(latitude, longitude, today, today)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlantOpsError::DataSourceUnavailable(format!("CE Hub: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw, ROW_DATE_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

fn numeric(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Group rows by calendar date and fold each day's measures into one record.
///
/// Rows with an unreadable date or no label are dropped. A later row for the
/// same measure overwrites an earlier one.
fn merge_rows(rows: Vec<CeHubRow>) -> Vec<DailyWeatherRecord> {
    let mut by_date: BTreeMap<NaiveDate, DailyWeatherRecord> = BTreeMap::new();

    for row in rows {
        let Some(date) = row.date.as_deref().and_then(parse_row_date) else {
            tracing::debug!(date = ?row.date, "skipping CE Hub row without a usable date");
            continue;
        };
        let Some(label) = row.measure_label else {
            continue;
        };
        let value = row.daily_value.as_ref().and_then(numeric);
        let record = by_date
            .entry(date)
            .or_insert_with(|| DailyWeatherRecord::new(date));
        if !record.set_measure(&label, value) {
            tracing::debug!(label = %label, "ignoring unknown CE Hub measure");
        }
    }

    let mut records: Vec<DailyWeatherRecord> = by_date.into_values().collect();
    sort_by_date(&mut records);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<CeHubRow> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn groups_rows_by_calendar_day() {
        let raw = json!([
            {"date": "2025/03/20 00:00:00", "measureLabel": "TempAir_DailyMax (C)", "dailyValue": 18.5},
            {"date": "2025/03/19 00:00:00", "measureLabel": "TempAir_DailyMax (C)", "dailyValue": 17.0},
            {"date": "2025/03/19 00:00:00", "measureLabel": "TempAir_DailyMin (C)", "dailyValue": 6.0},
            {"date": "2025/03/19 00:00:00", "measureLabel": "Precip_DailySum (mm)", "dailyValue": "1.2"},
            {"date": "2025/03/20 00:00:00", "measureLabel": "Soilmoisture_0to10cm_DailyAvg (vol%)", "dailyValue": 27}
        ]);
        let records = merge_rows(rows(raw));
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 3, 19).unwrap());
        assert_eq!(first.tmax, Some(17.0));
        assert_eq!(first.tmin, Some(6.0));
        assert_eq!(first.rainfall_mm, Some(1.2));
        assert!(first.soil_moisture.is_none());

        let second = &records[1];
        assert_eq!(second.tmax, Some(18.5));
        assert_eq!(second.soil_moisture, Some(27.0));
        assert!(second.tmin.is_none());
    }

    #[test]
    fn drops_unusable_rows() {
        let raw = json!([
            {"date": "not a date", "measureLabel": "TempAir_DailyMax (C)", "dailyValue": 20},
            {"date": "2025/03/19 00:00:00", "dailyValue": 20},
            {"date": "2025/03/19 00:00:00", "measureLabel": "Snow_DailySum (cm)", "dailyValue": 3},
            {"date": "2025/03/19 00:00:00", "measureLabel": "TempAir_DailyAvg (C)", "dailyValue": null}
        ]);
        let records = merge_rows(rows(raw));
        assert_eq!(records.len(), 1);
        assert!(records[0].average_temp.is_none());
    }

    #[test]
    fn query_carries_every_measure() {
        let client = CeHubClient::new(CeHubConfig {
            api_key: "k".into(),
            supplier: "Meteoblue".into(),
            base_url: "https://example.test/".into(),
            enabled: true,
        });
        assert_eq!(
            client.forecast_url(),
            "https://example.test/api/Forecast/ShortRangeForecastDaily"
        );
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let query = client.query(47.4239, 9.3767, day, day);
        let labels = &query.iter().find(|(k, _)| *k == "measureLabel").unwrap().1;
        assert_eq!(labels.split(';').count(), MEASURE_LABELS.len());
        assert!(query.contains(&("startDate", "2025-03-01".to_string())));
        assert!(query.contains(&("ApiKey", "k".to_string())));

        let url = client.request_url(47.4239, 9.3767, day, day).unwrap();
        assert_eq!(url.path(), "/api/Forecast/ShortRangeForecastDaily");
        assert!(url.query().unwrap().contains("supplier=Meteoblue"));
    }
}
