use super::calculations::{accumulate_gdd, average_rainfall_or_dry, filter_since, wet_days};
use super::growth_stage::estimate_stage;
use super::stress::score_day;
use crate::catalog::CropProfileCatalog;
use crate::error::{PlantOpsError, Result};
use chrono::NaiveDate;
use crate::models::{
    Advisory, BiosimulantReport, Crop, CropProfile, DailyWeatherRecord, DiseaseStatus,
    ProductDetail, ProductRecommendations, ProductTrigger, SeasonReport,
};

/// Days wetter than this count toward the disease check.
const WET_DAY_MM: f64 = 2.0;

fn resolve_crop(catalog: &CropProfileCatalog, crop: &str) -> Result<Crop> {
    catalog.resolve(crop).map_err(|_| {
        PlantOpsError::InvalidInput(format!(
            "Invalid or missing 'crop'. Must be one of: {}.",
            Crop::names()
        ))
    })
}

/// Products whose application window contains `gdd_total`.
///
/// StressBuster matches either of its GDD windows. YieldBooster matches its
/// first timing whose window contains the total; timings without a window
/// never match.
pub fn match_products(profile: &CropProfile, gdd_total: Option<f64>) -> ProductRecommendations {
    let mut recs = ProductRecommendations::default();
    let Some(gdd) = gdd_total else {
        return recs;
    };

    for product in profile.products {
        match product.trigger {
            ProductTrigger::GddWindows(windows) => {
                if windows.iter().any(|w| w.contains(gdd)) {
                    recs.push(ProductDetail::GddWindows {
                        product: product.product,
                        dosage: product.dosage,
                        application_frequency: product.application_frequency.unwrap_or("N/A"),
                        recommended_gdd_range: windows,
                    });
                }
            }
            ProductTrigger::Timings(timings) => {
                let hit = timings
                    .iter()
                    .find(|t| t.gdd.is_some_and(|w| w.contains(gdd)));
                if let Some(timing) = hit {
                    recs.push(ProductDetail::Timing {
                        product: product.product,
                        dosage: product.dosage,
                        recommended_timing: *timing,
                    });
                }
            }
        }
    }

    recs
}

/// The record to score: the one dated `target`, or the latest when no date
/// was asked for.
pub fn select_day(
    series: &[DailyWeatherRecord],
    target: Option<NaiveDate>,
) -> Result<&DailyWeatherRecord> {
    match target {
        Some(date) => series.iter().find(|r| r.date == date).ok_or_else(|| {
            PlantOpsError::InsufficientData(format!("No weather record for {}.", date))
        }),
        None => series
            .iter()
            .max_by_key(|r| r.date)
            .ok_or_else(|| PlantOpsError::InsufficientData("No weather records to score.".into())),
    }
}

/// Stress scores for one day plus the products due at the season's GDD.
///
/// GDD is accumulated over `series` from `planting_date` on; without a
/// series it stays unknown and no product is matched.
pub fn recommend_biosimulant(
    catalog: &CropProfileCatalog,
    crop: &str,
    day: &DailyWeatherRecord,
    series: Option<&[DailyWeatherRecord]>,
    planting_date: Option<&str>,
) -> Result<BiosimulantReport> {
    let crop = resolve_crop(catalog, crop)?;
    let profile = &catalog.entry(crop)?.profile;

    let gdd_total = series.and_then(|s| {
        let since = filter_since(s, planting_date);
        accumulate_gdd(since, profile.base_temp_c)
    });
    let estimated_growth_stage = estimate_stage(profile, gdd_total);
    tracing::debug!(crop = %crop, gdd = ?gdd_total, stage = ?estimated_growth_stage, "day advisory");

    Ok(BiosimulantReport {
        weather_stress: score_day(day),
        gdd_total,
        estimated_growth_stage,
        products: match_products(profile, gdd_total),
    })
}

fn season_irrigation(avg_rain_mm: f64) -> Advisory {
    if avg_rain_mm < 1.0 {
        Advisory::new(
            "Dry period detected – recommend mulching and consider drip irrigation.",
            "Water saving and improved yield efficiency.",
        )
    } else if avg_rain_mm > 5.0 {
        Advisory::new(
            "Heavy rain period – irrigate on demand.",
            "Avoid overwatering and reduce water cost.",
        )
    } else {
        Advisory::new(
            "Standard irrigation as per crop requirements.",
            "Maintain optimal soil moisture.",
        )
    }
}

fn season_soil_quality() -> Advisory {
    Advisory::new(
        "Enhance soil quality by applying compost/mulch and consider cover crops.",
        "Improves CO₂ sequestration, humus formation, and prevents erosion.",
    )
}

/// Season-to-date report over every record since planting.
pub fn recommend_extended(
    catalog: &CropProfileCatalog,
    crop: &str,
    series: &[DailyWeatherRecord],
    planting_date: &str,
) -> Result<SeasonReport> {
    let crop = resolve_crop(catalog, crop)?;
    let profile = &catalog.entry(crop)?.profile;

    let since = filter_since(series, Some(planting_date));
    let total_gdd = accumulate_gdd(since.iter().copied(), profile.base_temp_c);
    let estimated_growth_stage = estimate_stage(profile, total_gdd);

    let wet = wet_days(&since, WET_DAY_MM);
    let disease_risk = if !since.is_empty() && (wet as f64) > 0.5 * since.len() as f64 {
        DiseaseStatus::Warning(
            "Prolonged wet conditions detected – increased disease risk. Monitor crop health and consider preventive measures."
                .to_string(),
        )
    } else {
        DiseaseStatus::Status("Disease risk is low.".to_string())
    };

    tracing::debug!(
        crop = %crop,
        days = since.len(),
        wet_days = wet,
        "season report"
    );

    Ok(SeasonReport {
        total_gdd,
        estimated_growth_stage,
        critical_stage: estimated_growth_stage.is_some_and(|s| profile.is_critical(s)),
        biosimulants: match_products(profile, total_gdd),
        irrigation: season_irrigation(average_rainfall_or_dry(&since)),
        soil_quality: season_soil_quality(),
        soil_carbon: profile.soil_carbon,
        disease_risk,
    })
}
