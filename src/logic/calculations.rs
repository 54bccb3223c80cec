use crate::models::{round_to, DailyWeatherRecord};
use chrono::NaiveDate;

/// Records dated on or after `cutoff` (`YYYY-MM-DD`).
///
/// A missing or unparseable cutoff leaves the series as it is.
pub fn filter_since<'a>(
    series: &'a [DailyWeatherRecord],
    cutoff: Option<&str>,
) -> Vec<&'a DailyWeatherRecord> {
    let cutoff = cutoff.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
    match cutoff {
        Some(date) if !series.is_empty() => filter_since_date(series, date),
        _ => series.iter().collect(),
    }
}

pub fn filter_since_date(
    series: &[DailyWeatherRecord],
    cutoff: NaiveDate,
) -> Vec<&DailyWeatherRecord> {
    series.iter().filter(|r| r.date >= cutoff).collect()
}

/// Drop records dated after `end`.
pub fn truncate_after(series: &mut Vec<DailyWeatherRecord>, end: NaiveDate) {
    series.retain(|r| r.date <= end);
}

/// Growing degree days for one day from its min/max, floored at zero.
pub fn daily_gdd(tmax: f64, tmin: f64, base_temp_c: f64) -> f64 {
    ((tmax + tmin) / 2.0 - base_temp_c).max(0.0)
}

/// Calculate accumulated Growing Degree Days (GDD) over a daily series.
///
/// Days missing either TMAX or TMIN are skipped. Returns `None` only for an
/// empty series; otherwise the sum rounded to one decimal.
pub fn accumulate_gdd<'a, I>(series: I, base_temp_c: f64) -> Option<f64>
where
    I: IntoIterator<Item = &'a DailyWeatherRecord>,
{
    let mut series = series.into_iter().peekable();
    series.peek()?;

    let total: f64 = series
        .filter_map(|r| match (r.tmax, r.tmin) {
            (Some(tmax), Some(tmin)) => Some(daily_gdd(tmax, tmin, base_temp_c)),
            _ => None,
        })
        .sum();

    if total > 0.0 {
        Some(round_to(total, 1))
    } else {
        Some(0.0)
    }
}

/// Mean daily GDD from each day's average temperature. Zero when no day
/// reports one.
pub fn average_daily_gdd(series: &[DailyWeatherRecord], base_temp_c: f64) -> f64 {
    mean(
        series
            .iter()
            .filter_map(|r| r.average_temp)
            .map(|t| (t - base_temp_c).max(0.0)),
    )
    .unwrap_or(0.0)
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Highest TMAX in the series
pub fn max_tmax(series: &[DailyWeatherRecord]) -> Option<f64> {
    series.iter().filter_map(|r| r.tmax).reduce(f64::max)
}

/// Lowest TMIN in the series
pub fn min_tmin(series: &[DailyWeatherRecord]) -> Option<f64> {
    series.iter().filter_map(|r| r.tmin).reduce(f64::min)
}

/// Average rainfall where days without a reading count as dry.
pub fn average_rainfall_or_dry(series: &[&DailyWeatherRecord]) -> f64 {
    mean(series.iter().map(|r| r.rainfall_mm.unwrap_or(0.0))).unwrap_or(0.0)
}

/// Count days with rainfall strictly above the threshold
pub fn wet_days(series: &[&DailyWeatherRecord], threshold_mm: f64) -> usize {
    series
        .iter()
        .filter(|r| r.rainfall_mm.unwrap_or(0.0) > threshold_mm)
        .count()
}
