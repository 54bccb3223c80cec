use super::{Rule, SeasonContext};

/// Frost risk warning
///
/// Fires when the coldest night of the series drops below the crop's chill
/// limit (0°C for Wheat and Rice, 4°C for Cotton).
pub struct FrostRule;

impl Rule for FrostRule {
    fn id(&self) -> &'static str {
        "frost_risk"
    }

    fn name(&self) -> &'static str {
        "Frost Risk"
    }

    fn evaluate(&self, ctx: &SeasonContext) -> Option<String> {
        let min_tmin = ctx.min_tmin?;

        if min_tmin >= ctx.thresholds.chill_limit_c {
            return None;
        }

        Some(format!(
            "ALERT: Frost risk - daily min dropped to {:.1}°C.",
            min_tmin
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{context, window};
    use crate::models::Crop;

    #[test]
    fn cotton_chills_earlier() {
        let w = window(22.0, 3.0);
        let cotton = context(Crop::Cotton, &w, Some(30.0), Some(3.5));
        assert_eq!(
            FrostRule.evaluate(&cotton).unwrap(),
            "ALERT: Frost risk - daily min dropped to 3.5°C."
        );
        let wheat = context(Crop::Wheat, &w, Some(30.0), Some(3.5));
        assert!(FrostRule.evaluate(&wheat).is_none());
    }

    #[test]
    fn limit_is_exclusive() {
        let w = window(15.0, 2.0);
        let at_limit = context(Crop::Wheat, &w, Some(20.0), Some(0.0));
        assert!(FrostRule.evaluate(&at_limit).is_none());
        let below = context(Crop::Wheat, &w, Some(20.0), Some(-0.1));
        assert!(FrostRule.evaluate(&below).is_some());
    }
}
