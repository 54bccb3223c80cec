pub mod disease_risk;
pub mod drought;
pub mod engine;
pub mod frost;
pub mod heat_stress;
pub mod irrigation;
pub mod soil;

pub use engine::{Advisories, RulesEngine};

use crate::catalog::{DangerThresholds, OptimalConditions};
use crate::models::{Advisory, Crop, PlantingWindow};

/// What the season rules look at: the chosen window plus the extremes of
/// the whole weather series.
#[derive(Debug, Clone)]
pub struct SeasonContext<'a> {
    pub crop: Crop,
    pub optimal: OptimalConditions,
    pub thresholds: DangerThresholds,
    pub window: &'a PlantingWindow,
    pub max_tmax: Option<f64>,
    pub min_tmin: Option<f64>,
}

/// Trait for weather warnings
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return an alert if it is breached
    fn evaluate(&self, ctx: &SeasonContext) -> Option<String>;
}

/// Trait for the advisory blocks, which always produce advice
pub trait AdvisoryRule: Send + Sync {
    fn id(&self) -> &'static str;

    fn advise(&self, ctx: &SeasonContext) -> Advisory;
}
