use crate::models::{DailyWeatherRecord, StressIndices};

/// Highest severity on every stress scale.
pub const MAX_SEVERITY: f64 = 9.0;

const DAY_HEAT_OPTIMAL_C: f64 = 32.0;
const DAY_HEAT_LIMIT_C: f64 = 45.0;
const NIGHT_HEAT_OPTIMAL_C: f64 = 22.0;
const NIGHT_HEAT_LIMIT_C: f64 = 28.0;
const NO_FROST_C: f64 = 4.0;
const FROST_C: f64 = -3.0;

/// Daytime heat stress from TMAX: 0 up to 32°C, linear to 9 at 45°C.
pub fn daytime_heat_stress(tmax: Option<f64>) -> Option<f64> {
    let t = tmax?;
    Some(if t <= DAY_HEAT_OPTIMAL_C {
        0.0
    } else if t >= DAY_HEAT_LIMIT_C {
        MAX_SEVERITY
    } else {
        MAX_SEVERITY * (t - DAY_HEAT_OPTIMAL_C) / (DAY_HEAT_LIMIT_C - DAY_HEAT_OPTIMAL_C)
    })
}

/// Nighttime heat stress from TMIN: 0 below 22°C, linear to 9 at 28°C.
pub fn nighttime_heat_stress(tmin: Option<f64>) -> Option<f64> {
    let t = tmin?;
    Some(if t < NIGHT_HEAT_OPTIMAL_C {
        0.0
    } else if t >= NIGHT_HEAT_LIMIT_C {
        MAX_SEVERITY
    } else {
        MAX_SEVERITY * (t - NIGHT_HEAT_OPTIMAL_C) / (NIGHT_HEAT_LIMIT_C - NIGHT_HEAT_OPTIMAL_C)
    })
}

/// Frost stress from TMIN: 0 at 4°C and above, 9 at -3°C and below.
pub fn frost_stress(tmin: Option<f64>) -> Option<f64> {
    let t = tmin?;
    Some(if t >= NO_FROST_C {
        0.0
    } else if t <= FROST_C {
        MAX_SEVERITY
    } else {
        MAX_SEVERITY * (t - NO_FROST_C).abs() / (FROST_C - NO_FROST_C).abs()
    })
}

/// Three-level drought risk (0 none, 5 moderate, 9 high) from the dryness
/// index `(rain - ET) + (soil_moisture / 100) / avg_temp`.
///
/// The soil term is dropped when the average temperature is exactly zero.
pub fn drought_risk(
    average_temp: Option<f64>,
    rainfall: Option<f64>,
    evapotranspiration: Option<f64>,
    soil_moisture: Option<f64>,
) -> Option<u8> {
    let (temp, rain, et, moisture) = (average_temp?, rainfall?, evapotranspiration?, soil_moisture?);

    let water_balance = rain - et;
    let dryness_index = if temp == 0.0 {
        water_balance
    } else {
        water_balance + (moisture / 100.0) / temp
    };

    Some(if dryness_index > 1.0 {
        0
    } else if dryness_index > 0.5 {
        5
    } else {
        9
    })
}

/// All four indices for one day.
pub fn score_day(day: &DailyWeatherRecord) -> StressIndices {
    StressIndices {
        daytime_heat_stress: daytime_heat_stress(day.tmax),
        nighttime_heat_stress: nighttime_heat_stress(day.tmin),
        frost_stress: frost_stress(day.tmin),
        drought_risk: drought_risk(
            day.average_temp,
            day.rainfall_mm,
            day.evapotranspiration,
            day.soil_moisture,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn daytime_ramp() {
        assert_eq!(daytime_heat_stress(Some(20.0)), Some(0.0));
        assert_eq!(daytime_heat_stress(Some(32.0)), Some(0.0));
        assert!(close(daytime_heat_stress(Some(38.5)), 4.5));
        assert_eq!(daytime_heat_stress(Some(45.0)), Some(9.0));
        assert_eq!(daytime_heat_stress(Some(50.0)), Some(9.0));
        assert_eq!(daytime_heat_stress(None), None);
    }

    #[test]
    fn nighttime_ramp() {
        assert_eq!(nighttime_heat_stress(Some(21.9)), Some(0.0));
        assert_eq!(nighttime_heat_stress(Some(22.0)), Some(0.0));
        assert!(close(nighttime_heat_stress(Some(25.0)), 4.5));
        assert_eq!(nighttime_heat_stress(Some(28.0)), Some(9.0));
        assert_eq!(nighttime_heat_stress(None), None);
    }

    #[test]
    fn frost_ramp() {
        assert_eq!(frost_stress(Some(4.0)), Some(0.0));
        assert_eq!(frost_stress(Some(10.0)), Some(0.0));
        assert!(close(frost_stress(Some(0.5)), 4.5));
        assert_eq!(frost_stress(Some(-3.0)), Some(9.0));
        assert_eq!(frost_stress(Some(-10.0)), Some(9.0));
        assert_eq!(frost_stress(None), None);
    }

    #[test]
    fn rice_hot_day() {
        let day = DailyWeatherRecord::new(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
            .with_temps(40.0, 25.0);
        let stress = score_day(&day);
        let daytime = stress.daytime_heat_stress.unwrap();
        assert!(daytime > 0.0 && daytime < 9.0);
        assert!(close(stress.daytime_heat_stress, 9.0 * 8.0 / 13.0));
        assert!(close(stress.nighttime_heat_stress, 4.5));
        assert_eq!(stress.frost_stress, Some(0.0));
        assert_eq!(stress.drought_risk, None);
    }

    #[test]
    fn drought_levels() {
        // 3 - 1 + (30/100)/20 = 2.015
        assert_eq!(drought_risk(Some(20.0), Some(3.0), Some(1.0), Some(30.0)), Some(0));
        // 1.7 - 1 + 0.015 = 0.715
        assert_eq!(drought_risk(Some(20.0), Some(1.7), Some(1.0), Some(30.0)), Some(5));
        // 2 - 5 + 0.015 < 0.5
        assert_eq!(drought_risk(Some(20.0), Some(2.0), Some(5.0), Some(30.0)), Some(9));
    }

    #[test]
    fn drought_zero_temperature_drops_soil_term() {
        // Soil term would be infinite; only rain - ET counts.
        assert_eq!(drought_risk(Some(0.0), Some(1.8), Some(1.0), Some(90.0)), Some(5));
        assert_eq!(drought_risk(Some(0.0), Some(1.0), Some(1.0), Some(90.0)), Some(9));
    }

    #[test]
    fn drought_requires_all_inputs() {
        assert_eq!(drought_risk(None, Some(1.0), Some(1.0), Some(30.0)), None);
        assert_eq!(drought_risk(Some(20.0), None, Some(1.0), Some(30.0)), None);
        assert_eq!(drought_risk(Some(20.0), Some(1.0), None, Some(30.0)), None);
        assert_eq!(drought_risk(Some(20.0), Some(1.0), Some(1.0), None), None);
    }
}
