use super::calculations::mean;
use crate::catalog::OptimalConditions;
use crate::error::{PlantOpsError, Result};
use crate::models::{DailyWeatherRecord, PlantingWindow};

/// Consecutive records in a planting window.
pub const WINDOW_DAYS: usize = 7;

/// Score of a window against the crop's optimum: zero is a perfect match,
/// more negative is worse.
pub fn score_window(avg_temp: f64, avg_rain: f64, optimal: &OptimalConditions) -> f64 {
    -(avg_temp - optimal.temp_c).abs() - (avg_rain - optimal.rainfall_mm).abs()
}

/// Slide a 7-record window over a date-sorted series and keep the best-scoring one.
///
/// Windows missing every temperature or every rainfall value are skipped.
/// Ties keep the earliest window.
pub fn find_planting_window(
    series: &[DailyWeatherRecord],
    optimal: &OptimalConditions,
) -> Result<PlantingWindow> {
    let mut best: Option<PlantingWindow> = None;

    for (start, window) in series.windows(WINDOW_DAYS).enumerate() {
        let avg_temp = mean(window.iter().filter_map(|r| r.average_temp));
        let avg_rain = mean(window.iter().filter_map(|r| r.rainfall_mm));

        let (avg_temp, avg_rain) = match (avg_temp, avg_rain) {
            (Some(t), Some(r)) => (t, r),
            _ => {
                tracing::debug!(start, "skipping window without temperature or rainfall");
                continue;
            }
        };

        let score = score_window(avg_temp, avg_rain, optimal);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(PlantingWindow {
                start_date: window[0].date,
                end_date: window[WINDOW_DAYS - 1].date,
                average_temperature: avg_temp,
                average_rainfall: avg_rain,
                score,
            });
        }
    }

    best.ok_or_else(|| {
        PlantOpsError::InsufficientData(
            "Insufficient weather data to determine optimal planting window.".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const WHEAT: OptimalConditions = OptimalConditions {
        temp_c: 15.0,
        rainfall_mm: 2.0,
    };

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset))
            .unwrap()
    }

    fn record(offset: u64, temp: f64, rain: f64) -> DailyWeatherRecord {
        DailyWeatherRecord::new(day(offset))
            .with_average_temp(temp)
            .with_rainfall(rain)
    }

    #[test]
    fn perfect_match_scores_zero() {
        let series: Vec<_> = (0..10).map(|d| record(d, 15.0, 2.0)).collect();
        let window = find_planting_window(&series, &WHEAT).unwrap();
        assert_eq!(window.score, 0.0);
        assert_eq!(window.average_temperature, 15.0);
        assert_eq!(window.average_rainfall, 2.0);
        // Every window ties; the first one wins.
        assert_eq!(window.start_date, day(0));
        assert_eq!(window.end_date, day(6));
    }

    #[test]
    fn picks_best_window() {
        let mut series: Vec<_> = (0..7).map(|d| record(d, 25.0, 0.0)).collect();
        series.extend((7..14).map(|d| record(d, 15.0, 2.0)));
        let window = find_planting_window(&series, &WHEAT).unwrap();
        assert_eq!(window.start_date, day(7));
        assert_eq!(window.end_date, day(13));
        assert_eq!(window.score, 0.0);
    }

    #[test]
    fn ties_keep_earliest_window() {
        // Window 0 averages 16°C, window 1 averages 14°C: both 1°C off.
        let mut series: Vec<_> = (0..8).map(|d| record(d, 15.0, 2.0)).collect();
        series[0].average_temp = Some(22.0);
        series[7].average_temp = Some(8.0);
        let window = find_planting_window(&series, &WHEAT).unwrap();
        assert_eq!(window.start_date, day(0));
        assert_eq!(window.score, -1.0);
    }

    #[test]
    fn averages_ignore_missing_values() {
        let mut series: Vec<_> = (0..7).map(|d| record(d, 15.0, 2.0)).collect();
        series[3].average_temp = None;
        series[4].rainfall_mm = None;
        let window = find_planting_window(&series, &WHEAT).unwrap();
        assert_eq!(window.average_temperature, 15.0);
        assert_eq!(window.average_rainfall, 2.0);
    }

    #[test]
    fn skips_windows_without_rain_data() {
        let mut series: Vec<_> = (0..8).map(|d| record(d, 15.0, 2.0)).collect();
        for r in series.iter_mut().take(7) {
            r.rainfall_mm = None;
        }
        // Only the window starting at day 1 still has one rainfall value.
        let window = find_planting_window(&series, &WHEAT).unwrap();
        assert_eq!(window.start_date, day(1));
        assert_eq!(window.average_rainfall, 2.0);
    }

    #[test]
    fn too_few_records() {
        let series: Vec<_> = (0..6).map(|d| record(d, 15.0, 2.0)).collect();
        let err = find_planting_window(&series, &WHEAT).unwrap_err();
        assert!(matches!(err, PlantOpsError::InsufficientData(_)));
        assert!(find_planting_window(&[], &WHEAT).is_err());
    }

    #[test]
    fn no_scorable_window() {
        let series: Vec<_> = (0..10)
            .map(|d| DailyWeatherRecord::new(day(d)).with_rainfall(2.0))
            .collect();
        let err = find_planting_window(&series, &WHEAT).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Insufficient weather data to determine optimal planting window."
        );
    }

    #[test]
    fn chosen_window_always_has_data() {
        // Alternate missing fields so several windows get skipped.
        let series: Vec<_> = (0..20)
            .map(|d| {
                let mut r = record(d, 10.0 + d as f64, 1.0);
                if d % 3 == 0 {
                    r.average_temp = None;
                }
                r
            })
            .collect();
        let window = find_planting_window(&series, &WHEAT).unwrap();
        let start = series.iter().position(|r| r.date == window.start_date).unwrap();
        let slice = &series[start..start + WINDOW_DAYS];
        assert!(slice.iter().any(|r| r.average_temp.is_some()));
        assert!(slice.iter().any(|r| r.rainfall_mm.is_some()));
    }
}
