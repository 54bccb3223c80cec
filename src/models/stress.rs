use super::crop::{GddWindow, GrowthStage, Product, SoilCarbon, StageTiming};
use super::schedule::Advisory;
use serde::Serialize;

/// Stress severities on a 0-9 scale. `None` when the day lacked the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StressIndices {
    pub daytime_heat_stress: Option<f64>,
    pub nighttime_heat_stress: Option<f64>,
    pub frost_stress: Option<f64>,
    pub drought_risk: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductDetail {
    GddWindows {
        product: Product,
        dosage: &'static str,
        application_frequency: &'static str,
        recommended_gdd_range: [GddWindow; 2],
    },
    Timing {
        product: Product,
        dosage: &'static str,
        recommended_timing: StageTiming,
    },
}

impl ProductDetail {
    pub fn product(&self) -> Product {
        match self {
            ProductDetail::GddWindows { product, .. } | ProductDetail::Timing { product, .. } => {
                *product
            }
        }
    }
}

pub const NO_PRODUCT_INDICATED: &str = "No biosimulant strongly indicated";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRecommendations {
    pub recommended_products: Vec<Product>,
    pub detailed_recommendations: Vec<ProductDetail>,
}

impl ProductRecommendations {
    pub fn push(&mut self, detail: ProductDetail) {
        self.recommended_products.push(detail.product());
        self.detailed_recommendations.push(detail);
    }

    pub fn is_empty(&self) -> bool {
        self.recommended_products.is_empty()
    }

    /// Product names for display, or the no-match notice.
    pub fn headline(&self) -> String {
        if self.is_empty() {
            NO_PRODUCT_INDICATED.to_string()
        } else {
            self.recommended_products
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// Day-of advisory for a single day's weather.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiosimulantReport {
    pub weather_stress: StressIndices,
    pub gdd_total: Option<f64>,
    pub estimated_growth_stage: Option<GrowthStage>,
    #[serde(flatten)]
    pub products: ProductRecommendations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseStatus {
    Warning(String),
    Status(String),
}

/// Season-to-date advisory built from everything since planting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    pub total_gdd: Option<f64>,
    pub estimated_growth_stage: Option<GrowthStage>,
    pub critical_stage: bool,
    pub biosimulants: ProductRecommendations,
    pub irrigation: Advisory,
    pub soil_quality: Advisory,
    pub soil_carbon: SoilCarbon,
    pub disease_risk: DiseaseStatus,
}
