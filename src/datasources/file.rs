use crate::error::{PlantOpsError, Result};
use crate::models::{sort_by_date, DailyWeatherRecord};
use std::path::Path;

/// Load a JSON array of daily records, sorted by date.
///
/// Records may use either the plain field names or provider measure labels.
pub fn load_series(path: &Path) -> Result<Vec<DailyWeatherRecord>> {
    let content = std::fs::read_to_string(path)?;
    let series = parse_series(&content)?;
    tracing::info!(path = %path.display(), days = series.len(), "loaded weather file");
    Ok(series)
}

pub fn parse_series(content: &str) -> Result<Vec<DailyWeatherRecord>> {
    let mut series: Vec<DailyWeatherRecord> = serde_json::from_str(content)?;
    if series.is_empty() {
        return Err(PlantOpsError::UpstreamFailure(
            "Weather file contains no records.".into(),
        ));
    }
    sort_by_date(&mut series);
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn parses_mixed_labels_and_sorts() {
        let content = json!([
            {"date": "2025-03-02", "TMAX": 21.0, "TMIN": 9.0, "Precip_DailySum (mm)": 0.0},
            {"date": "2025-03-01", "TempAir_DailyMax (C)": 19.0, "TMIN": 7.5, "rainfall_mm": 3.1}
        ])
        .to_string();
        let series = parse_series(&content).unwrap();
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(series[0].tmax, Some(19.0));
        assert_eq!(series[1].rainfall_mm, Some(0.0));
    }

    #[test]
    fn empty_file_is_upstream_failure() {
        assert!(matches!(
            parse_series("[]"),
            Err(PlantOpsError::UpstreamFailure(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_series("{\"date\": 1}"),
            Err(PlantOpsError::Json(_))
        ));
    }
}
