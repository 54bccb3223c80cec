use super::{AdvisoryRule, SeasonContext};
use crate::models::Advisory;

/// Irrigation advice from average daily rainfall
///
/// - Dry: below 1 mm/day
/// - Wet: above 5 mm/day
/// - Normal otherwise
pub struct IrrigationRule;

impl IrrigationRule {
    pub fn for_rainfall(&self, avg_rain_mm: f64) -> Advisory {
        if avg_rain_mm < 1.0 {
            Advisory::new(
                "Dry period detected – recommend mulching and drip irrigation.",
                "Saves water and can boost yield efficiency by ~10%.",
            )
        } else if avg_rain_mm > 5.0 {
            Advisory::new(
                "Heavy rain period – irrigate on demand.",
                "Avoids overwatering and reduces water cost by ~15%.",
            )
        } else {
            Advisory::new(
                "Standard irrigation as per crop requirements.",
                "Maintains optimal soil moisture for steady growth.",
            )
        }
    }
}

impl AdvisoryRule for IrrigationRule {
    fn id(&self) -> &'static str {
        "irrigation"
    }

    fn advise(&self, ctx: &SeasonContext) -> Advisory {
        self.for_rainfall(ctx.window.average_rainfall)
    }
}
