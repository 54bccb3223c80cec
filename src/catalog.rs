//! Per-crop reference data: biology, planting targets, danger limits and
//! product performance figures. Built once at startup and only read after.

use crate::error::{PlantOpsError, Result};
use crate::models::{
    BiologicalProduct, Crop, CropProfile, GddWindow, GrowthStage, Product, ProductTrigger,
    SoilCarbon, StageTiming,
};
use serde::Serialize;
use std::collections::HashMap;

const STRESS_BUSTER_DOSAGE: &str = "2-3 L/ha or 150-250 mL/hL";
const STRESS_BUSTER_FREQUENCY: &str = "2 times per growth cycle in case of abiotic stress";
const GUIDELINE_DOSAGE: &str = "As per product guidelines";

/// Temperature and rainfall a planting window is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimalConditions {
    pub temp_c: f64,
    pub rainfall_mm: f64,
}

/// Extreme-weather limits for the season warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DangerThresholds {
    /// Breached when the series maximum TMAX reaches this value.
    pub heat_limit_c: f64,
    /// Breached when the series minimum TMIN drops below this value.
    pub chill_limit_c: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub profile: CropProfile,
    pub optimal: OptimalConditions,
    pub thresholds: DangerThresholds,
}

#[derive(Debug, Clone)]
pub struct CropProfileCatalog {
    entries: HashMap<Crop, CatalogEntry>,
    performance: HashMap<(Product, Crop), &'static str>,
}

impl CropProfileCatalog {
    pub fn builtin() -> Self {
        let entries = HashMap::from([
            (
                Crop::Wheat,
                CatalogEntry {
                    profile: wheat_profile(),
                    optimal: OptimalConditions {
                        temp_c: 15.0,
                        rainfall_mm: 2.0,
                    },
                    thresholds: DangerThresholds {
                        heat_limit_c: 32.0,
                        chill_limit_c: 0.0,
                    },
                },
            ),
            (
                Crop::Rice,
                CatalogEntry {
                    profile: rice_profile(),
                    optimal: OptimalConditions {
                        temp_c: 20.0,
                        rainfall_mm: 4.0,
                    },
                    thresholds: DangerThresholds {
                        heat_limit_c: 38.0,
                        chill_limit_c: 0.0,
                    },
                },
            ),
            (
                Crop::Cotton,
                CatalogEntry {
                    profile: cotton_profile(),
                    optimal: OptimalConditions {
                        temp_c: 22.0,
                        rainfall_mm: 3.0,
                    },
                    thresholds: DangerThresholds {
                        heat_limit_c: 38.0,
                        chill_limit_c: 4.0,
                    },
                },
            ),
        ]);

        let roi = "Key figure: 3.9:1 ROI – every 3.9 invested yields increased productivity.";
        let performance = HashMap::from([
            ((Product::StressBuster, Crop::Wheat), roi),
            ((Product::StressBuster, Crop::Rice), roi),
            ((Product::StressBuster, Crop::Cotton), roi),
            (
                (Product::YieldBooster, Crop::Wheat),
                "Key figure: +0.3 t/ha – confirmed yield increase in wheat.",
            ),
            (
                (Product::YieldBooster, Crop::Rice),
                "Key figure: +0.4 t/ha – confirmed yield increase in rice.",
            ),
            (
                (Product::YieldBooster, Crop::Cotton),
                "Key figure: Yield improvement observed in field trials.",
            ),
        ]);

        Self {
            entries,
            performance,
        }
    }

    /// Resolve a crop name from user input.
    pub fn resolve(&self, name: &str) -> Result<Crop> {
        Crop::from_str(name)
            .filter(|crop| self.entries.contains_key(crop))
            .ok_or_else(|| PlantOpsError::InvalidCrop(name.to_string()))
    }

    pub fn entry(&self, crop: Crop) -> Result<&CatalogEntry> {
        self.entries
            .get(&crop)
            .ok_or_else(|| PlantOpsError::InvalidCrop(crop.to_string()))
    }

    pub fn profile(&self, crop: Crop) -> Option<&CropProfile> {
        self.entries.get(&crop).map(|e| &e.profile)
    }

    pub fn performance(&self, product: Product, crop: Crop) -> Option<&'static str> {
        self.performance.get(&(product, crop)).copied()
    }

    /// Entries in `Crop::all()` order.
    pub fn entries(&self) -> Vec<&CatalogEntry> {
        Crop::all()
            .iter()
            .filter_map(|c| self.entries.get(c))
            .collect()
    }
}

impl Default for CropProfileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn wheat_profile() -> CropProfile {
    const TIMINGS: &[StageTiming] = &[StageTiming {
        stage: "Flag leaf growth stage",
        gdd: Some(GddWindow::new(600.0, 700.0)),
    }];
    const PRODUCTS: &[BiologicalProduct] = &[
        BiologicalProduct {
            product: Product::StressBuster,
            dosage: STRESS_BUSTER_DOSAGE,
            application_frequency: Some(STRESS_BUSTER_FREQUENCY),
            trigger: ProductTrigger::GddWindows([
                GddWindow::new(450.0, 500.0),
                GddWindow::new(900.0, 950.0),
            ]),
        },
        BiologicalProduct {
            product: Product::YieldBooster,
            dosage: GUIDELINE_DOSAGE,
            application_frequency: None,
            trigger: ProductTrigger::Timings(TIMINGS),
        },
    ];

    CropProfile {
        crop: Crop::Wheat,
        base_temp_c: 5.0,
        total_water_requirement_mm: 450.0,
        stage_gdd: [50.0, 150.0, 200.0, 50.0],
        critical_stages: &[GrowthStage::Flowering],
        products: PRODUCTS,
        soil_carbon: SoilCarbon {
            baseline_soc: 1.0,
            sequestration_potential: "0.1-0.2% increase in SOC per year",
            recommended_practices: &[
                "Cover cropping with legumes",
                "Conservation tillage",
                "Application of compost or biochar",
            ],
        },
    }
}

fn rice_profile() -> CropProfile {
    const TIMINGS: &[StageTiming] = &[
        StageTiming {
            stage: "Beginning of booting",
            gdd: Some(GddWindow::new(800.0, 850.0)),
        },
        StageTiming {
            stage: "Heading growth stage",
            gdd: Some(GddWindow::new(1050.0, 1100.0)),
        },
    ];
    const PRODUCTS: &[BiologicalProduct] = &[
        BiologicalProduct {
            product: Product::StressBuster,
            dosage: STRESS_BUSTER_DOSAGE,
            application_frequency: Some(STRESS_BUSTER_FREQUENCY),
            trigger: ProductTrigger::GddWindows([
                GddWindow::new(450.0, 500.0),
                GddWindow::new(1050.0, 1100.0),
            ]),
        },
        BiologicalProduct {
            product: Product::YieldBooster,
            dosage: GUIDELINE_DOSAGE,
            application_frequency: None,
            trigger: ProductTrigger::Timings(TIMINGS),
        },
    ];

    CropProfile {
        crop: Crop::Rice,
        base_temp_c: 10.0,
        total_water_requirement_mm: 1200.0,
        stage_gdd: [100.0, 500.0, 400.0, 200.0],
        critical_stages: &[GrowthStage::Flowering, GrowthStage::Vegetative],
        products: PRODUCTS,
        soil_carbon: SoilCarbon {
            baseline_soc: 1.2,
            sequestration_potential: "0.2-0.3% increase in SOC per year",
            recommended_practices: &[
                "Alternate wetting and drying (AWD)",
                "Application of rice straw compost",
                "Cover cropping with green manure",
            ],
        },
    }
}

fn cotton_profile() -> CropProfile {
    const TIMINGS: &[StageTiming] = &[
        StageTiming {
            stage: "Before squares appear",
            gdd: Some(GddWindow::new(350.0, 400.0)),
        },
        StageTiming {
            stage: "3-4 weeks after first application",
            gdd: None,
        },
    ];
    const PRODUCTS: &[BiologicalProduct] = &[
        BiologicalProduct {
            product: Product::StressBuster,
            dosage: STRESS_BUSTER_DOSAGE,
            application_frequency: Some(STRESS_BUSTER_FREQUENCY),
            trigger: ProductTrigger::GddWindows([
                GddWindow::new(500.0, 550.0),
                GddWindow::new(900.0, 950.0),
            ]),
        },
        BiologicalProduct {
            product: Product::YieldBooster,
            dosage: STRESS_BUSTER_DOSAGE,
            application_frequency: None,
            trigger: ProductTrigger::Timings(TIMINGS),
        },
    ];

    CropProfile {
        crop: Crop::Cotton,
        base_temp_c: 12.0,
        total_water_requirement_mm: 700.0,
        stage_gdd: [50.0, 300.0, 250.0, 100.0],
        critical_stages: &[GrowthStage::Flowering],
        products: PRODUCTS,
        soil_carbon: SoilCarbon {
            baseline_soc: 0.8,
            sequestration_potential: "0.1-0.3% increase in SOC per year",
            recommended_practices: &[
                "Intercropping with legumes",
                "Mulching with crop residues",
                "Application of biochar",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_crop_has_an_entry() {
        let catalog = CropProfileCatalog::builtin();
        for crop in Crop::all() {
            let entry = catalog.entry(*crop).unwrap();
            assert_eq!(entry.profile.crop, *crop);
        }
        assert_eq!(catalog.entries().len(), 3);
    }

    #[test]
    fn resolve_rejects_unknown_crop() {
        let catalog = CropProfileCatalog::builtin();
        assert_eq!(catalog.resolve("wheat").unwrap(), Crop::Wheat);
        let err = catalog.resolve("Bean").unwrap_err();
        assert!(matches!(err, PlantOpsError::InvalidCrop(ref name) if name == "Bean"));
    }

    #[test]
    fn stage_boundaries_are_strictly_increasing() {
        let catalog = CropProfileCatalog::builtin();
        for entry in catalog.entries() {
            let [a, b, c] = entry.profile.stage_boundaries();
            assert!(0.0 < a && a < b && b < c, "{:?}", entry.profile.crop);
        }
    }

    #[test]
    fn stage_boundaries_known_values() {
        let catalog = CropProfileCatalog::builtin();
        let wheat = catalog.profile(Crop::Wheat).unwrap();
        let rice = catalog.profile(Crop::Rice).unwrap();
        let cotton = catalog.profile(Crop::Cotton).unwrap();
        assert_eq!(wheat.stage_boundaries(), [50.0, 200.0, 400.0]);
        assert_eq!(rice.stage_boundaries(), [100.0, 600.0, 1000.0]);
        assert_eq!(cotton.stage_boundaries(), [50.0, 350.0, 600.0]);
    }

    #[test]
    fn optimal_and_thresholds() {
        let catalog = CropProfileCatalog::builtin();
        assert_eq!(
            catalog.entry(Crop::Wheat).unwrap().optimal,
            OptimalConditions {
                temp_c: 15.0,
                rainfall_mm: 2.0
            }
        );
        assert_eq!(catalog.entry(Crop::Cotton).unwrap().thresholds.chill_limit_c, 4.0);
        assert_eq!(catalog.entry(Crop::Wheat).unwrap().thresholds.heat_limit_c, 32.0);
    }

    #[test]
    fn performance_lookup() {
        let catalog = CropProfileCatalog::builtin();
        assert!(catalog
            .performance(Product::YieldBooster, Crop::Rice)
            .unwrap()
            .contains("+0.4 t/ha"));
        assert!(catalog
            .performance(Product::StressBuster, Crop::Cotton)
            .unwrap()
            .contains("3.9:1 ROI"));
    }

    #[test]
    fn critical_stages() {
        let catalog = CropProfileCatalog::builtin();
        let rice = catalog.profile(Crop::Rice).unwrap();
        assert!(rice.is_critical(GrowthStage::Vegetative));
        assert!(!rice.is_critical(GrowthStage::Maturity));
    }
}
