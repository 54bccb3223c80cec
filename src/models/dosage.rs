use serde::Serialize;

/// Hectares per acre.
pub const HECTARES_PER_ACRE: f64 = 0.404686;

pub fn acres_to_hectares(acres: f64) -> f64 {
    acres * HECTARES_PER_ACRE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DosageUnit {
    LitersPerHectare,
    MillilitersPerHectoliter,
    Unspecified,
}

impl DosageUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DosageUnit::LitersPerHectare => "L/ha",
            DosageUnit::MillilitersPerHectoliter => "mL/hL",
            DosageUnit::Unspecified => "",
        }
    }
}

/// Dosage rate read from a catalog label such as `"2-3 L/ha or 150-250 mL/hL"`.
///
/// The first unit mentioned wins, per-hectare liquid taking precedence.
/// Bounds are whatever numeric range directly precedes that unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dosage {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub unit: DosageUnit,
}

impl Dosage {
    pub fn parse(text: &str) -> Self {
        let unit = if text.contains("L/ha") {
            DosageUnit::LitersPerHectare
        } else if text.contains("mL/hL") {
            DosageUnit::MillilitersPerHectoliter
        } else {
            return Self {
                lower: None,
                upper: None,
                unit: DosageUnit::Unspecified,
            };
        };

        let prefix = text.split(unit.as_str()).next().unwrap_or_default();
        let mut bounds = prefix.split('-');
        let lower = bounds.next().and_then(|s| s.trim().parse::<f64>().ok());
        let upper = bounds
            .next()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .or(lower);

        Self { lower, upper, unit }
    }

    /// Total quantity for a field of the given size, at the lower bound.
    pub fn amount_for(&self, field_size_ha: f64) -> DoseAmount {
        match (self.unit, self.lower) {
            (DosageUnit::LitersPerHectare, Some(rate)) => {
                DoseAmount::Liters(round2(rate * field_size_ha))
            }
            (DosageUnit::LitersPerHectare, None) => DoseAmount::Unavailable,
            (DosageUnit::MillilitersPerHectoliter, _) => DoseAmount::PerHectoliterGuidelines,
            (DosageUnit::Unspecified, _) => DoseAmount::Guidelines,
        }
    }
}

/// Quantity attached to a single timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DoseAmount {
    Liters(f64),
    Unavailable,
    PerHectoliterGuidelines,
    Guidelines,
}

impl DoseAmount {
    pub fn liters(&self) -> Option<f64> {
        match self {
            DoseAmount::Liters(l) => Some(*l),
            _ => None,
        }
    }
}

impl std::fmt::Display for DoseAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoseAmount::Liters(l) => write!(f, "Amount: {:.2} liters", l),
            DoseAmount::Unavailable => write!(f, "Dosage calculation unavailable."),
            DoseAmount::PerHectoliterGuidelines => {
                write!(f, "Follow product guidelines for mL/hL dosage.")
            }
            DoseAmount::Guidelines => write!(f, "Follow product guidelines."),
        }
    }
}

/// Round to `places` decimals from the exact binary value, so a stored
/// 449.95 (really 449.9499...) becomes 449.9 and an exact tie goes to even.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_range_per_hectare() {
        let dosage = Dosage::parse("2-3 L/ha or 150-250 mL/hL");
        assert_eq!(dosage.unit, DosageUnit::LitersPerHectare);
        assert_eq!(dosage.lower, Some(2.0));
        assert_eq!(dosage.upper, Some(3.0));
    }

    #[test]
    fn parse_single_value_per_hectare() {
        let dosage = Dosage::parse("2 L/ha");
        assert_eq!(dosage.lower, Some(2.0));
        assert_eq!(dosage.upper, Some(2.0));
    }

    #[test]
    fn parse_per_hectoliter_only() {
        let dosage = Dosage::parse("150-250 mL/hL");
        assert_eq!(dosage.unit, DosageUnit::MillilitersPerHectoliter);
        assert_eq!(dosage.lower, Some(150.0));
        assert_eq!(
            dosage.amount_for(4.0).to_string(),
            "Follow product guidelines for mL/hL dosage."
        );
    }

    #[test]
    fn parse_free_text() {
        let dosage = Dosage::parse("As per product guidelines");
        assert_eq!(dosage.unit, DosageUnit::Unspecified);
        assert_eq!(dosage.amount_for(10.0), DoseAmount::Guidelines);
        assert_eq!(
            dosage.amount_for(10.0).to_string(),
            "Follow product guidelines."
        );
    }

    #[test]
    fn per_hectare_without_number_is_unavailable() {
        let dosage = Dosage::parse("apply L/ha as needed");
        assert_eq!(dosage.unit, DosageUnit::LitersPerHectare);
        assert_eq!(dosage.amount_for(2.0), DoseAmount::Unavailable);
        assert_eq!(
            dosage.amount_for(2.0).to_string(),
            "Dosage calculation unavailable."
        );
    }

    #[test]
    fn amount_for_ten_acres() {
        let ha = acres_to_hectares(10.0);
        assert!((ha - 4.04686).abs() < 1e-9);
        let amount = Dosage::parse("2-3 L/ha").amount_for(ha);
        assert_eq!(amount, DoseAmount::Liters(8.09));
        assert_eq!(amount.to_string(), "Amount: 8.09 liters");
        assert_eq!(amount.liters(), Some(8.09));
    }

    #[test]
    fn round_to_uses_exact_binary_value() {
        assert_eq!(round_to(10.25, 1), 10.2);
        assert_eq!(round_to(449.95, 1), 449.9);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round2(8.094), 8.09);
        assert_eq!(round2(2.675), 2.67);
    }
}
