use super::{AdvisoryRule, SeasonContext};
use crate::models::Advisory;

/// Disease risk from planting window wetness
///
/// Fungal pathogens need leaf wetness; average daily rainfall is the proxy.
/// - High: above 4 mm/day
/// - Low: below 1 mm/day
/// - Moderate otherwise
pub struct DiseaseRiskRule;

impl AdvisoryRule for DiseaseRiskRule {
    fn id(&self) -> &'static str {
        "disease_risk"
    }

    fn advise(&self, ctx: &SeasonContext) -> Advisory {
        let avg_rain = ctx.window.average_rainfall;

        if avg_rain > 4.0 {
            Advisory::new(
                "Prolonged wet conditions detected – high disease risk.",
                "Recommend fungicide and improved drainage to reduce risk by ~20%.",
            )
        } else if avg_rain < 1.0 {
            Advisory::new(
                "Dry conditions – low risk of disease outbreak.",
                "Minimal pathogen activity expected.",
            )
        } else {
            Advisory::new(
                "Moderate wetness – moderate disease risk.",
                "Monitor crop health and apply preventive measures if needed.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{context, window};
    use crate::models::Crop;

    fn advise(avg_rain: f64) -> Advisory {
        let w = window(20.0, avg_rain);
        DiseaseRiskRule.advise(&context(Crop::Rice, &w, None, None))
    }

    #[test]
    fn wet_dry_moderate() {
        assert!(advise(4.5).suggestion.contains("high disease risk"));
        assert!(advise(0.5).suggestion.contains("low risk"));
        assert!(advise(4.0).suggestion.contains("moderate disease risk"));
        assert!(advise(1.0).suggestion.contains("moderate disease risk"));
    }
}
