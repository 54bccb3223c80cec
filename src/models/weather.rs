use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of weather for a location.
///
/// Every measurement is optional: a value the provider did not report stays
/// `None` and is skipped by the calculations rather than read as zero.
/// Provider measure labels are accepted as aliases so raw exports load as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeatherRecord {
    pub date: NaiveDate,
    #[serde(rename = "TMAX", alias = "TempAir_DailyMax (C)", default)]
    pub tmax: Option<f64>,
    #[serde(rename = "TMIN", alias = "TempAir_DailyMin (C)", default)]
    pub tmin: Option<f64>,
    #[serde(alias = "TempAir_DailyAvg (C)", default)]
    pub average_temp: Option<f64>,
    #[serde(alias = "Precip_DailySum (mm)", default)]
    pub rainfall_mm: Option<f64>,
    #[serde(alias = "HumidityRel_DailyAvg (pct)", default)]
    pub humidity: Option<f64>,
    #[serde(alias = "WindSpeed_DailyAvg (m/s)", default)]
    pub wind_speed: Option<f64>,
    #[serde(alias = "WindDirection_DailyAvg (Deg)", default)]
    pub wind_dir: Option<f64>,
    #[serde(alias = "Cloudcover_DailyAvg (pct)", default)]
    pub cloudcover: Option<f64>,
    #[serde(alias = "SunshineDuration_DailySum (min)", default)]
    pub sunshine: Option<f64>,
    #[serde(alias = "Soilmoisture_0to10cm_DailyAvg (vol%)", default)]
    pub soil_moisture: Option<f64>,
    #[serde(alias = "Evapotranspiration_DailySum (mm)", default)]
    pub evapotranspiration: Option<f64>,
}

impl DailyWeatherRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tmax: None,
            tmin: None,
            average_temp: None,
            rainfall_mm: None,
            humidity: None,
            wind_speed: None,
            wind_dir: None,
            cloudcover: None,
            sunshine: None,
            soil_moisture: None,
            evapotranspiration: None,
        }
    }

    pub fn with_temps(mut self, tmax: f64, tmin: f64) -> Self {
        self.tmax = Some(tmax);
        self.tmin = Some(tmin);
        self
    }

    pub fn with_average_temp(mut self, temp: f64) -> Self {
        self.average_temp = Some(temp);
        self
    }

    pub fn with_rainfall(mut self, mm: f64) -> Self {
        self.rainfall_mm = Some(mm);
        self
    }

    /// Set a field from a provider measure label. Returns false for labels
    /// this record does not carry.
    pub fn set_measure(&mut self, label: &str, value: Option<f64>) -> bool {
        let slot = match label {
            "TempAir_DailyMax (C)" => &mut self.tmax,
            "TempAir_DailyMin (C)" => &mut self.tmin,
            "TempAir_DailyAvg (C)" => &mut self.average_temp,
            "Precip_DailySum (mm)" => &mut self.rainfall_mm,
            "HumidityRel_DailyAvg (pct)" => &mut self.humidity,
            "WindSpeed_DailyAvg (m/s)" => &mut self.wind_speed,
            "WindDirection_DailyAvg (Deg)" => &mut self.wind_dir,
            "Cloudcover_DailyAvg (pct)" => &mut self.cloudcover,
            "SunshineDuration_DailySum (min)" => &mut self.sunshine,
            "Soilmoisture_0to10cm_DailyAvg (vol%)" => &mut self.soil_moisture,
            "Evapotranspiration_DailySum (mm)" => &mut self.evapotranspiration,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Measure labels requested from the daily forecast provider.
pub const MEASURE_LABELS: [&str; 11] = [
    "TempAir_DailyAvg (C)",
    "TempAir_DailyMax (C)",
    "TempAir_DailyMin (C)",
    "HumidityRel_DailyAvg (pct)",
    "Precip_DailySum (mm)",
    "WindSpeed_DailyAvg (m/s)",
    "WindDirection_DailyAvg (Deg)",
    "Cloudcover_DailyAvg (pct)",
    "SunshineDuration_DailySum (min)",
    "Soilmoisture_0to10cm_DailyAvg (vol%)",
    "Evapotranspiration_DailySum (mm)",
];

/// Sort a series ascending by date. Stable, so same-day records keep
/// their provider order.
pub fn sort_by_date(series: &mut [DailyWeatherRecord]) {
    series.sort_by_key(|r| r.date);
}
