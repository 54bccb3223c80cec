mod catalog;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;

use anyhow::{bail, Context};
use catalog::CropProfileCatalog;
use chrono::NaiveDate;
use clap::Parser;
use cli::{AdviseArgs, Cli, Commands, ScheduleArgs, SeasonArgs};
use config::{Config, WeatherSource};
use datasources::{fetch_series, CeHubClient, Coordinates, NominatimClient, SeriesRequest};
use dialoguer::{Input, Select};
use logic::{
    recommend_biosimulant, recommend_extended, select_day, truncate_after, FertilizerScheduler,
    RulesEngine,
};
use models::{Crop, DailyWeatherRecord, Payload, ScheduleRecommendation};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct ScheduleOutput {
    #[serde(flatten)]
    schedule: ScheduleRecommendation,
    total_fertilizer_needed: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let catalog = CropProfileCatalog::builtin();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Check => run_check(cli.config).await?,
        Commands::Crops => print_json(&catalog.entries())?,
        Commands::Schedule(args) => {
            let config = Config::load_or_default(cli.config)?;
            run_schedule(&config, &catalog, args).await?;
        }
        Commands::Advise(args) => {
            let config = Config::load_or_default(cli.config)?;
            run_advise(&config, &catalog, args).await?;
        }
        Commands::Season(args) => {
            let config = Config::load_or_default(cli.config)?;
            run_season(&config, &catalog, args).await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Print the payload; an error payload also ends the process with status 1.
fn emit<T: Serialize>(payload: Payload<T>) -> anyhow::Result<()> {
    print_json(&payload)?;
    if payload.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn prompt_crop() -> anyhow::Result<String> {
    let names: Vec<&str> = Crop::all().iter().map(|c| c.as_str()).collect();
    let idx = Select::new()
        .with_prompt("Crop")
        .items(&names)
        .default(0)
        .interact()
        .context("Failed to read crop")?;
    Ok(names[idx].to_string())
}

fn prompt_field_size() -> anyhow::Result<f64> {
    Input::new()
        .with_prompt("Field size (acres)")
        .validate_with(|v: &f64| {
            if *v > 0.0 {
                Ok(())
            } else {
                Err("must be positive")
            }
        })
        .interact_text()
        .context("Failed to read field size")
}

fn prompt_town() -> anyhow::Result<String> {
    Input::new()
        .with_prompt("Town")
        .interact_text()
        .context("Failed to read town")
}

async fn geocode(config: &Config, town: &str) -> anyhow::Result<Coordinates> {
    let client = NominatimClient::new(config.geocoder.clone())?;
    Ok(client.geocode(town).await?)
}

/// Coordinates from the command line, then the config, then a prompt.
async fn resolve_coordinates(config: &Config, args: &ScheduleArgs) -> anyhow::Result<Coordinates> {
    if let (Some(latitude), Some(longitude)) = (args.lat, args.lon) {
        return Ok(Coordinates {
            latitude,
            longitude,
        });
    }
    if let Some(town) = &args.town {
        return geocode(config, town).await;
    }
    if let Some((latitude, longitude)) = config.farm.coordinates() {
        return Ok(Coordinates {
            latitude,
            longitude,
        });
    }
    let town = match &config.farm.town {
        Some(town) => town.clone(),
        None => prompt_town()?,
    };
    geocode(config, &town).await
}

fn resolve_source(
    config: &Config,
    source: Option<&str>,
    file: Option<&PathBuf>,
) -> anyhow::Result<WeatherSource> {
    if file.is_some() {
        return Ok(WeatherSource::File);
    }
    match source {
        Some(raw) => match WeatherSource::from_str(raw) {
            Some(source) => Ok(source),
            None => bail!("Unknown weather source '{}': use historical, forecast or file", raw),
        },
        None => Ok(config.weather.source),
    }
}

async fn run_schedule(
    config: &Config,
    catalog: &CropProfileCatalog,
    args: ScheduleArgs,
) -> anyhow::Result<()> {
    let crop = match args.crop.clone().or_else(|| config.farm.crop.clone()) {
        Some(crop) => crop,
        None => prompt_crop()?,
    };
    let field_size = match args.field_size.or(config.farm.field_size_acres) {
        Some(size) => size,
        None => prompt_field_size()?,
    };
    if field_size.is_nan() || field_size <= 0.0 {
        bail!("Field size must be positive, got {}", field_size);
    }
    if let Err(e) = catalog.resolve(&crop) {
        return emit::<ScheduleOutput>(e.into_payload());
    }

    let source = resolve_source(config, args.source.as_deref(), args.weather_file.as_ref())?;
    let coordinates = match source {
        WeatherSource::File => None,
        _ => Some(resolve_coordinates(config, &args).await?),
    };

    let request = SeriesRequest {
        source,
        coordinates,
        start: config.weather.candidate_start,
        end: config.weather.candidate_end,
        file: args.weather_file.clone(),
    };
    tracing::info!(crop = %crop, field_size, source = %source, "building schedule");

    let series = match fetch_series(config, &request).await {
        Ok(series) => series,
        Err(e) => return emit::<ScheduleOutput>(e.into_payload()),
    };

    let result = FertilizerScheduler::new(catalog)
        .recommend(&crop, &series, field_size)
        .map(|schedule| ScheduleOutput {
            total_fertilizer_needed: schedule.total_fertilizer_needed(),
            schedule,
        });
    emit(Payload::from(result))
}

/// Weather from the given file, else from the configured source over the
/// farm's location.
async fn season_series(
    config: &Config,
    weather_file: Option<PathBuf>,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<DailyWeatherRecord>> {
    let source = resolve_source(config, None, weather_file.as_ref())?;
    let coordinates = match source {
        WeatherSource::File => None,
        _ => match (config.farm.coordinates(), &config.farm.town) {
            (Some((latitude, longitude)), _) => Some(Coordinates {
                latitude,
                longitude,
            }),
            (None, Some(town)) => Some(geocode(config, town).await?),
            (None, None) => None,
        },
    };

    let request = SeriesRequest {
        source,
        coordinates,
        start,
        end,
        file: weather_file,
    };
    Ok(fetch_series(config, &request).await?)
}

async fn run_advise(
    config: &Config,
    catalog: &CropProfileCatalog,
    args: AdviseArgs,
) -> anyhow::Result<()> {
    let planting = parse_date(&args.planting_date)?;
    let target = args.date.as_deref().map(parse_date).transpose()?;
    if target.is_some_and(|d| d < planting) {
        bail!("Recommendation date cannot be before the planting date.");
    }

    let end = target.unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut series = season_series(config, args.weather_file, planting, end).await?;
    if let Some(date) = target {
        truncate_after(&mut series, date);
    }

    let day = match select_day(&series, target) {
        Ok(day) => day,
        Err(e) => return emit::<models::BiosimulantReport>(e.into_payload()),
    };
    tracing::info!(date = %day.date, crop = %args.crop, "scoring day");

    let result = recommend_biosimulant(
        catalog,
        &args.crop,
        day,
        Some(&series),
        Some(&args.planting_date),
    );
    if let Ok(report) = &result {
        tracing::info!(products = %report.products.headline(), "biosimulants");
    }
    emit(Payload::from(result))
}

async fn run_season(
    config: &Config,
    catalog: &CropProfileCatalog,
    args: SeasonArgs,
) -> anyhow::Result<()> {
    let planting = parse_date(&args.planting_date)?;
    let target = args.date.as_deref().map(parse_date).transpose()?;
    if target.is_some_and(|d| d < planting) {
        bail!("Recommendation date cannot be before the planting date.");
    }

    let end = target.unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut series = season_series(config, args.weather_file, planting, end).await?;
    if let Some(date) = target {
        truncate_after(&mut series, date);
    }
    let result = recommend_extended(catalog, &args.crop, &series, &args.planting_date);
    if let Ok(report) = &result {
        tracing::info!(products = %report.biosimulants.headline(), "biosimulants");
    }
    emit(Payload::from(result))
}

async fn run_check(config_override: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_override).context("Configuration error")?;
    println!("Config OK");
    println!("  Farm: {}", config.farm.name);
    if let Some(crop) = &config.farm.crop {
        println!("  Crop: {}", crop);
    }
    println!(
        "  Weather: {} ({} to {})",
        config.weather.source, config.weather.candidate_start, config.weather.candidate_end
    );

    let rules = RulesEngine::new();
    for (id, name) in rules.list_rules() {
        tracing::debug!(id, name, "warning rule loaded");
    }

    let coordinates = match (config.farm.coordinates(), &config.farm.town) {
        (Some((latitude, longitude)), _) => Some(Coordinates {
            latitude,
            longitude,
        }),
        (None, Some(town)) => match geocode(&config, town).await {
            Ok(coords) => {
                println!(
                    "  Geocoder: OK ({}: {:.4}, {:.4})",
                    town, coords.latitude, coords.longitude
                );
                Some(coords)
            }
            Err(e) => {
                println!("  Geocoder: OFFLINE ({})", e);
                None
            }
        },
        (None, None) => None,
    };

    match (config.active_cehub(), coordinates) {
        (Some(cehub), Some(coords)) => {
            let ok = CeHubClient::new(cehub.clone())
                .test_connection(coords.latitude, coords.longitude)
                .await
                .unwrap_or(false);
            println!("  CE Hub: {}", if ok { "OK" } else { "OFFLINE" });
        }
        (Some(_), None) => println!("  CE Hub: skipped (no location)"),
        (None, _) => println!("  CE Hub: not configured"),
    }

    Ok(())
}
