use super::calculations::{average_daily_gdd, max_tmax, min_tmin};
use super::planting_window::find_planting_window;
use super::rules::{RulesEngine, SeasonContext};
use crate::catalog::CropProfileCatalog;
use crate::error::Result;
use crate::models::{
    acres_to_hectares, round2, sort_by_date, BiologicalProduct, Crop, DailyWeatherRecord,
    DayOffset, Dosage, FertilizerEvent, PlantingWindow, Product, ProductTrigger,
    ScheduleRecommendation,
};

/// Offset used for every named-stage application; stages are not converted
/// from GDD to days.
pub const STAGE_TIMING_DAY: u32 = 30;

/// Dosage used for YieldBooster when the catalog only says to follow the label.
pub const YIELD_BOOSTER_DEFAULT_DOSAGE: &str = "2 L/ha";

/// Builds the planting schedule: best window, product timeline, warnings
/// and advisories.
pub struct FertilizerScheduler<'a> {
    catalog: &'a CropProfileCatalog,
    rules: RulesEngine,
}

impl<'a> FertilizerScheduler<'a> {
    pub fn new(catalog: &'a CropProfileCatalog) -> Self {
        Self {
            catalog,
            rules: RulesEngine::new(),
        }
    }

    /// Recommend a planting window and application schedule.
    ///
    /// The crop is checked before anything else. The series is sorted by date
    /// on a private copy.
    pub fn recommend(
        &self,
        crop: &str,
        series: &[DailyWeatherRecord],
        field_size_acres: f64,
    ) -> Result<ScheduleRecommendation> {
        let crop = self.catalog.resolve(crop)?;
        let entry = self.catalog.entry(crop)?;
        let field_size_ha = acres_to_hectares(field_size_acres);

        let mut series = series.to_vec();
        sort_by_date(&mut series);

        let window = find_planting_window(&series, &entry.optimal)?;
        tracing::debug!(
            crop = %crop,
            start = %window.start_date,
            score = window.score,
            "planting window selected"
        );

        let avg_daily_gdd = average_daily_gdd(&series, entry.profile.base_temp_c);
        let timeline = self.build_timeline(crop, &window, avg_daily_gdd, field_size_ha);
        let total_fertilizer_liters = total_fertilizer_liters(&timeline);
        tracing::debug!(
            events = timeline.len(),
            avg_daily_gdd,
            "fertilizer timeline built"
        );

        let ctx = SeasonContext {
            crop,
            optimal: entry.optimal,
            thresholds: entry.thresholds,
            window: &window,
            max_tmax: max_tmax(&series),
            min_tmin: min_tmin(&series),
        };
        let warnings = self.rules.warnings(&ctx);
        let advice = self.rules.advisories(&ctx);

        Ok(ScheduleRecommendation {
            crop,
            field_size_ha,
            optimal_planting_interval: window,
            fertilizer_timeline: timeline,
            total_fertilizer_liters,
            warnings,
            irrigation_rec: advice.irrigation,
            soil_rec: advice.soil,
            disease_risk: advice.disease_risk,
        })
    }

    /// Planting first, then one event per application, ordered by day with
    /// unresolved offsets last.
    pub fn build_timeline(
        &self,
        crop: Crop,
        window: &PlantingWindow,
        avg_daily_gdd: f64,
        field_size_ha: f64,
    ) -> Vec<FertilizerEvent> {
        let mut timeline = vec![FertilizerEvent::planting()];

        if let Some(profile) = self.catalog.profile(crop) {
            for product in profile.products {
                timeline.extend(self.product_events(crop, product, avg_daily_gdd, field_size_ha));
            }
        }

        // Stable, so Planting stays ahead of any day-0 application.
        timeline.sort_by_key(|e| e.day);

        timeline
            .into_iter()
            .map(|e| e.anchored_at(window.start_date))
            .collect()
    }

    fn product_events(
        &self,
        crop: Crop,
        product: &BiologicalProduct,
        avg_daily_gdd: f64,
        field_size_ha: f64,
    ) -> Vec<FertilizerEvent> {
        let name = product.product;
        let dose = dosage_for(product).amount_for(field_size_ha);
        let data = self.catalog.performance(name, crop);

        match product.trigger {
            // Only the first window anchors the offset.
            ProductTrigger::GddWindows([first, _]) => {
                let day = day_offset_for_gdd(first.start, avg_daily_gdd);
                let instructions =
                    format!("At ~{} GDD, apply {}. {}", first.start, name, dose);
                vec![FertilizerEvent::application(day, name, instructions, dose).with_data(data)]
            }
            ProductTrigger::Timings(timings) => {
                let take = if name == Product::YieldBooster {
                    1
                } else {
                    timings.len()
                };
                timings
                    .iter()
                    .take(take)
                    .map(|timing| {
                        let instructions = format!(
                            "At {} (~day {}), apply {}. {}",
                            timing.stage, STAGE_TIMING_DAY, name, dose
                        );
                        FertilizerEvent::application(
                            DayOffset::Day(STAGE_TIMING_DAY),
                            name,
                            instructions,
                            dose,
                        )
                        .with_data(data)
                    })
                    .collect()
            }
        }
    }
}

fn dosage_for(product: &BiologicalProduct) -> Dosage {
    if product.product == Product::YieldBooster
        && product.dosage.trim().eq_ignore_ascii_case("as per product guidelines")
    {
        Dosage::parse(YIELD_BOOSTER_DEFAULT_DOSAGE)
    } else {
        Dosage::parse(product.dosage)
    }
}

/// Days until `gdd` is reached at the average daily rate, rounding halves
/// to even. Unresolved when no heat accumulates.
pub fn day_offset_for_gdd(gdd: f64, avg_daily_gdd: f64) -> DayOffset {
    if avg_daily_gdd > 0.0 {
        DayOffset::Day((gdd / avg_daily_gdd).round_ties_even() as u32)
    } else {
        DayOffset::Unresolved
    }
}

/// Total liters over the timeline, one dose per event. `None` when nothing
/// has a liters amount.
pub fn total_fertilizer_liters(timeline: &[FertilizerEvent]) -> Option<f64> {
    let total = timeline
        .iter()
        .filter_map(|e| e.dose.and_then(|d| d.liters()))
        .fold(0.0, |acc, liters| acc + liters);

    if total > 0.0 {
        Some(round2(total))
    } else {
        None
    }
}
