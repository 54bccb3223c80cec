use super::{Rule, SeasonContext};

/// Drought warning: the planting window averages less than half the crop's
/// optimal daily rainfall.
pub struct DroughtRule;

impl Rule for DroughtRule {
    fn id(&self) -> &'static str {
        "drought_risk"
    }

    fn name(&self) -> &'static str {
        "Drought Risk"
    }

    fn evaluate(&self, ctx: &SeasonContext) -> Option<String> {
        let avg_rain = ctx.window.average_rainfall;
        let optimal = ctx.optimal.rainfall_mm;

        if avg_rain >= 0.5 * optimal {
            return None;
        }

        Some(format!(
            "ALERT: Drought risk - average rainfall was only {:.1}mm (optimal {}mm).",
            avg_rain, optimal
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{context, window};
    use crate::models::Crop;

    #[test]
    fn below_half_optimal() {
        let w = window(20.0, 1.9);
        let ctx = context(Crop::Rice, &w, None, None);
        assert_eq!(
            DroughtRule.evaluate(&ctx).unwrap(),
            "ALERT: Drought risk - average rainfall was only 1.9mm (optimal 4mm)."
        );
    }

    #[test]
    fn exactly_half_is_fine() {
        let w = window(20.0, 2.0);
        let ctx = context(Crop::Rice, &w, None, None);
        assert!(DroughtRule.evaluate(&ctx).is_none());
    }
}
