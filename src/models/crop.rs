use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Crop {
    Wheat,
    Rice,
    Cotton,
}

impl Crop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Cotton => "Cotton",
        }
    }

    pub fn all() -> &'static [Crop] {
        &[Crop::Wheat, Crop::Rice, Crop::Cotton]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wheat" => Some(Crop::Wheat),
            "rice" => Some(Crop::Rice),
            "cotton" => Some(Crop::Cotton),
            _ => None,
        }
    }

    /// Comma separated list of the supported crop names.
    pub fn names() -> String {
        Crop::all()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrowthStage {
    Germination,
    Vegetative,
    Flowering,
    Maturity,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "Germination",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Maturity => "Maturity",
        }
    }

    pub fn all() -> &'static [GrowthStage] {
        &[
            GrowthStage::Germination,
            GrowthStage::Vegetative,
            GrowthStage::Flowering,
            GrowthStage::Maturity,
        ]
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    StressBuster,
    YieldBooster,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::StressBuster => "StressBuster",
            Product::YieldBooster => "YieldBooster",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive GDD interval in which a product application is due.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GddWindow {
    pub start: f64,
    pub end: f64,
}

impl GddWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, gdd: f64) -> bool {
        self.start <= gdd && gdd <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageTiming {
    pub stage: &'static str,
    /// `None` for follow-up applications that are timed relative to a
    /// previous one instead of by GDD.
    pub gdd: Option<GddWindow>,
}

/// How the catalog says an application is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ProductTrigger {
    /// Two disjoint application windows.
    GddWindows([GddWindow; 2]),
    /// Named growth-stage timings.
    Timings(&'static [StageTiming]),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiologicalProduct {
    pub product: Product,
    pub dosage: &'static str,
    pub application_frequency: Option<&'static str>,
    pub trigger: ProductTrigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilCarbon {
    pub baseline_soc: f64,
    pub sequestration_potential: &'static str,
    pub recommended_practices: &'static [&'static str],
}

/// Biological reference data for one crop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProfile {
    pub crop: Crop,
    /// Base temperature in °C for growing degree days.
    pub base_temp_c: f64,
    /// Water needed per crop cycle in mm.
    pub total_water_requirement_mm: f64,
    /// GDD spent in each stage, in `GrowthStage::all()` order.
    pub stage_gdd: [f64; 4],
    pub critical_stages: &'static [GrowthStage],
    pub products: &'static [BiologicalProduct],
    pub soil_carbon: SoilCarbon,
}

impl CropProfile {
    /// Lower GDD bounds of Vegetative, Flowering and Maturity.
    pub fn stage_boundaries(&self) -> [f64; 3] {
        let [germination, vegetative, flowering, _] = self.stage_gdd;
        [
            germination,
            germination + vegetative,
            germination + vegetative + flowering,
        ]
    }

    pub fn is_critical(&self, stage: GrowthStage) -> bool {
        self.critical_stages.contains(&stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_from_str_valid() {
        assert_eq!(Crop::from_str("Wheat"), Some(Crop::Wheat));
        assert_eq!(Crop::from_str("rice"), Some(Crop::Rice));
        assert_eq!(Crop::from_str(" COTTON "), Some(Crop::Cotton));
    }

    #[test]
    fn crop_from_str_invalid() {
        assert_eq!(Crop::from_str("Bean"), None);
        assert_eq!(Crop::from_str(""), None);
        assert_eq!(Crop::from_str("maize"), None);
    }

    #[test]
    fn crop_round_trip() {
        for crop in Crop::all() {
            assert_eq!(Crop::from_str(crop.as_str()), Some(*crop));
        }
    }

    #[test]
    fn crop_names_lists_all() {
        assert_eq!(Crop::names(), "Wheat, Rice, Cotton");
    }

    #[test]
    fn gdd_window_is_inclusive() {
        let window = GddWindow::new(450.0, 500.0);
        assert!(window.contains(450.0));
        assert!(window.contains(500.0));
        assert!(!window.contains(449.9));
        assert!(!window.contains(500.1));
    }
}
