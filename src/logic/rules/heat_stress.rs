use super::{Rule, SeasonContext};

/// Dangerous heat warning
///
/// Fires when the hottest day of the series reaches the crop's heat limit
/// (Wheat 32°C, Rice and Cotton 38°C).
pub struct HeatStressRule;

impl Rule for HeatStressRule {
    fn id(&self) -> &'static str {
        "dangerous_heat"
    }

    fn name(&self) -> &'static str {
        "Dangerous Heat"
    }

    fn evaluate(&self, ctx: &SeasonContext) -> Option<String> {
        let max_tmax = ctx.max_tmax?;
        let limit = ctx.thresholds.heat_limit_c;

        if max_tmax < limit {
            return None;
        }

        Some(format!(
            "ALERT: Dangerous heat - daily max reached {:.1}°C (limit {}°C).",
            max_tmax, limit
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::test_support::{context, window};
    use crate::models::Crop;

    #[test]
    fn fires_at_limit() {
        let w = window(15.0, 2.0);
        let ctx = context(Crop::Wheat, &w, Some(32.0), Some(5.0));
        assert_eq!(
            HeatStressRule.evaluate(&ctx).unwrap(),
            "ALERT: Dangerous heat - daily max reached 32.0°C (limit 32°C)."
        );
    }

    #[test]
    fn limit_differs_per_crop() {
        let w = window(20.0, 4.0);
        let rice = context(Crop::Rice, &w, Some(35.0), Some(5.0));
        assert!(HeatStressRule.evaluate(&rice).is_none());
        let wheat = context(Crop::Wheat, &w, Some(35.0), Some(5.0));
        assert!(HeatStressRule.evaluate(&wheat).is_some());
    }

    #[test]
    fn silent_without_data() {
        let w = window(15.0, 2.0);
        let ctx = context(Crop::Wheat, &w, None, None);
        assert!(HeatStressRule.evaluate(&ctx).is_none());
    }
}
