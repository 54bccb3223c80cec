use super::{AdvisoryRule, SeasonContext};
use crate::models::Advisory;

/// Soil management advice: mulch when the window runs more than 2°C above
/// the crop's optimum.
pub struct SoilRule;

impl AdvisoryRule for SoilRule {
    fn id(&self) -> &'static str {
        "soil_management"
    }

    fn advise(&self, ctx: &SeasonContext) -> Advisory {
        if ctx.window.average_temperature > ctx.optimal.temp_c + 2.0 {
            Advisory::new(
                "High temperature expected – apply organic mulch and consider cover cropping.",
                "Reduces evaporation and can improve yield potential by ~10%.",
            )
        } else {
            Advisory::new(
                "Maintain current soil management practices.",
                "Sustains soil health and nutrient retention.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{context, window};
    use crate::models::Crop;

    #[test]
    fn hot_window_gets_mulch() {
        let w = window(17.5, 2.0);
        let ctx = context(Crop::Wheat, &w, None, None);
        assert!(SoilRule.advise(&ctx).suggestion.starts_with("High temperature"));
    }

    #[test]
    fn two_degrees_over_is_still_normal() {
        let w = window(17.0, 2.0);
        let ctx = context(Crop::Wheat, &w, None, None);
        assert_eq!(
            SoilRule.advise(&ctx).suggestion,
            "Maintain current soil management practices."
        );
    }
}
