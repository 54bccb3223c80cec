use super::crop::{Crop, Product};
use super::dosage::{round2, DoseAmount};
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The 7-day interval picked for planting.
///
/// Averages are kept at full precision for the downstream rules and rounded
/// to two decimals only when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantingWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(serialize_with = "serialize_round2")]
    pub average_temperature: f64,
    #[serde(serialize_with = "serialize_round2")]
    pub average_rainfall: f64,
    pub score: f64,
}

fn serialize_round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

/// Days after planting start. Unresolved offsets order after every resolved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DayOffset {
    Day(u32),
    Unresolved,
}

impl DayOffset {
    pub fn days(&self) -> Option<u32> {
        match self {
            DayOffset::Day(d) => Some(*d),
            DayOffset::Unresolved => None,
        }
    }
}

impl Serialize for DayOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DayOffset::Day(d) => serializer.serialize_u32(*d),
            DayOffset::Unresolved => serializer.serialize_str("N/A"),
        }
    }
}

impl std::fmt::Display for DayOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayOffset::Day(d) => write!(f, "{}", d),
            DayOffset::Unresolved => write!(f, "N/A"),
        }
    }
}

/// Flattened into its event as `"event": "Planting"` or `"product": "<name>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Planting,
    Application(Product),
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            EventKind::Planting => map.serialize_entry("event", "Planting")?,
            EventKind::Application(product) => map.serialize_entry("product", product)?,
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerEvent {
    pub day: DayOffset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub event: EventKind,
    pub instructions: String,
    /// Quantity for this event. One per event, so totals never double count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose: Option<DoseAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl FertilizerEvent {
    pub fn planting() -> Self {
        Self {
            day: DayOffset::Day(0),
            action_date: None,
            event: EventKind::Planting,
            instructions: "Planting: Prepare field and sow seeds.".to_string(),
            dose: None,
            data: None,
        }
    }

    pub fn application(
        day: DayOffset,
        product: Product,
        instructions: impl Into<String>,
        dose: DoseAmount,
    ) -> Self {
        Self {
            day,
            action_date: None,
            event: EventKind::Application(product),
            instructions: instructions.into(),
            dose: Some(dose),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Option<&str>) -> Self {
        self.data = data.map(str::to_string);
        self
    }

    /// Anchor the offset to a calendar date.
    pub fn anchored_at(mut self, planting_start: NaiveDate) -> Self {
        self.action_date = self
            .day
            .days()
            .and_then(|d| planting_start.checked_add_days(chrono::Days::new(d as u64)));
        self
    }
}

/// A suggestion with its expected effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub suggestion: String,
    pub effect: String,
}

impl Advisory {
    pub fn new(suggestion: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
            effect: effect.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRecommendation {
    pub crop: Crop,
    pub field_size_ha: f64,
    pub optimal_planting_interval: PlantingWindow,
    pub fertilizer_timeline: Vec<FertilizerEvent>,
    pub total_fertilizer_liters: Option<f64>,
    pub warnings: Vec<String>,
    pub irrigation_rec: Advisory,
    pub soil_rec: Advisory,
    pub disease_risk: Advisory,
}

impl ScheduleRecommendation {
    pub fn total_fertilizer_needed(&self) -> String {
        match self.total_fertilizer_liters {
            Some(total) => format!("{} liters", total),
            None => "Refer to product guidelines".to_string(),
        }
    }
}

/// What a front end receives: either the result or `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Ok(T),
    Error { error: String },
}

impl<T> Payload<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Payload::Error { .. })
    }
}

impl<T> From<crate::error::Result<T>> for Payload<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(value) => Payload::Ok(value),
            Err(e) => Payload::Error {
                error: e.to_string(),
            },
        }
    }
}
