use crate::models::{CropProfile, GrowthStage};

/// Map accumulated GDD to a growth stage.
///
/// Stage intervals are half-open on the crop's boundaries, lower bound
/// inclusive; Maturity covers everything from the last boundary up.
pub fn estimate_stage(profile: &CropProfile, gdd_total: Option<f64>) -> Option<GrowthStage> {
    let gdd = gdd_total?;
    let [vegetative, flowering, maturity] = profile.stage_boundaries();

    let stage = if gdd < vegetative {
        GrowthStage::Germination
    } else if gdd < flowering {
        GrowthStage::Vegetative
    } else if gdd < maturity {
        GrowthStage::Flowering
    } else {
        GrowthStage::Maturity
    };
    Some(stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CropProfileCatalog;
    use crate::models::Crop;

    #[test]
    fn wheat_boundaries() {
        let catalog = CropProfileCatalog::builtin();
        let wheat = catalog.profile(Crop::Wheat).unwrap();
        assert_eq!(estimate_stage(wheat, Some(0.0)), Some(GrowthStage::Germination));
        assert_eq!(estimate_stage(wheat, Some(49.9)), Some(GrowthStage::Germination));
        assert_eq!(estimate_stage(wheat, Some(50.0)), Some(GrowthStage::Vegetative));
        assert_eq!(estimate_stage(wheat, Some(199.9)), Some(GrowthStage::Vegetative));
        assert_eq!(estimate_stage(wheat, Some(200.0)), Some(GrowthStage::Flowering));
        assert_eq!(estimate_stage(wheat, Some(400.0)), Some(GrowthStage::Maturity));
        assert_eq!(estimate_stage(wheat, Some(5000.0)), Some(GrowthStage::Maturity));
    }

    #[test]
    fn rice_and_cotton_boundaries() {
        let catalog = CropProfileCatalog::builtin();
        let rice = catalog.profile(Crop::Rice).unwrap();
        let cotton = catalog.profile(Crop::Cotton).unwrap();
        assert_eq!(estimate_stage(rice, Some(99.0)), Some(GrowthStage::Germination));
        assert_eq!(estimate_stage(rice, Some(600.0)), Some(GrowthStage::Flowering));
        assert_eq!(estimate_stage(rice, Some(999.9)), Some(GrowthStage::Flowering));
        assert_eq!(estimate_stage(rice, Some(1000.0)), Some(GrowthStage::Maturity));
        assert_eq!(estimate_stage(cotton, Some(349.0)), Some(GrowthStage::Vegetative));
        assert_eq!(estimate_stage(cotton, Some(350.0)), Some(GrowthStage::Flowering));
        assert_eq!(estimate_stage(cotton, Some(600.0)), Some(GrowthStage::Maturity));
    }

    #[test]
    fn missing_gdd_has_no_stage() {
        let catalog = CropProfileCatalog::builtin();
        let wheat = catalog.profile(Crop::Wheat).unwrap();
        assert_eq!(estimate_stage(wheat, None), None);
    }

    #[test]
    fn stages_partition_without_gaps() {
        // Walk [0, 2000) in 0.5 steps: the stage never goes backwards and
        // each of the four stages is reached exactly once as a contiguous run.
        let catalog = CropProfileCatalog::builtin();
        for entry in catalog.entries() {
            let mut seen = Vec::new();
            let mut gdd = 0.0;
            while gdd < 2000.0 {
                let stage = estimate_stage(&entry.profile, Some(gdd)).unwrap();
                if seen.last() != Some(&stage) {
                    assert!(!seen.contains(&stage), "{:?} revisited", stage);
                    seen.push(stage);
                }
                gdd += 0.5;
            }
            assert_eq!(seen, GrowthStage::all().to_vec());
        }
    }
}
