use super::{
    disease_risk::DiseaseRiskRule, drought::DroughtRule, frost::FrostRule,
    heat_stress::HeatStressRule, irrigation::IrrigationRule, soil::SoilRule, AdvisoryRule, Rule,
    SeasonContext,
};
use crate::models::Advisory;

/// Emitted when no warning rule fires, so the list is never empty.
pub const MONITOR_ADVISORY: &str =
    "ALERT: Monitor local forecasts; conditions may change unexpectedly.";

#[derive(Debug, Clone, PartialEq)]
pub struct Advisories {
    pub irrigation: Advisory,
    pub soil: Advisory,
    pub disease_risk: Advisory,
}

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
    irrigation: IrrigationRule,
    soil: SoilRule,
    disease_risk: DiseaseRiskRule,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HeatStressRule),
            Box::new(FrostRule),
            Box::new(DroughtRule),
        ];

        Self {
            rules,
            irrigation: IrrigationRule,
            soil: SoilRule,
            disease_risk: DiseaseRiskRule,
        }
    }

    /// Warnings in rule order, or the single monitoring advisory.
    pub fn warnings(&self, ctx: &SeasonContext) -> Vec<String> {
        let mut warnings: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let alert = rule.evaluate(ctx);
                if alert.is_some() {
                    tracing::debug!(rule = rule.id(), crop = %ctx.crop, "warning triggered");
                }
                alert
            })
            .collect();

        if warnings.is_empty() {
            warnings.push(MONITOR_ADVISORY.to_string());
        }
        warnings
    }

    pub fn advisories(&self, ctx: &SeasonContext) -> Advisories {
        tracing::debug!(
            rules = ?[self.irrigation.id(), self.soil.id(), self.disease_risk.id()],
            "deriving advisories"
        );
        Advisories {
            irrigation: self.irrigation.advise(ctx),
            soil: self.soil.advise(ctx),
            disease_risk: self.disease_risk.advise(ctx),
        }
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
