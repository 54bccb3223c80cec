use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "plantops",
    version,
    about = "Planting window and biosimulant schedules from daily weather"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend a planting window and application timeline
    Schedule(ScheduleArgs),
    /// Day stress scores and products due since planting
    Advise(AdviseArgs),
    /// Season-to-date report since planting
    Season(SeasonArgs),
    /// Show the crop catalog
    Crops,
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    /// Wheat, Rice or Cotton
    #[arg(long)]
    pub crop: Option<String>,

    /// Field size in acres
    #[arg(long)]
    pub field_size: Option<f64>,

    /// Town to geocode
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub town: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// historical, forecast or file
    #[arg(long)]
    pub source: Option<String>,

    /// JSON array of daily records (implies --source file)
    #[arg(long)]
    pub weather_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AdviseArgs {
    #[arg(long)]
    pub crop: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub planting_date: String,

    /// Day to score, YYYY-MM-DD (defaults to the last record)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub weather_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SeasonArgs {
    #[arg(long)]
    pub crop: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub planting_date: String,

    /// Last day of the season so far, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub weather_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_schedule_with_coordinates() {
        let cli = Cli::try_parse_from([
            "plantops", "-vv", "schedule", "--crop", "Rice", "--lat", "-33.9", "--lon", "18.4",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Schedule(args) => {
                assert_eq!(args.crop.as_deref(), Some("Rice"));
                assert_eq!(args.lat, Some(-33.9));
                assert_eq!(args.lon, Some(18.4));
            }
            _ => panic!("expected schedule"),
        }
    }

    #[test]
    fn town_conflicts_with_coordinates() {
        let result = Cli::try_parse_from([
            "plantops", "schedule", "--town", "Pune", "--lat", "18.5", "--lon", "73.8",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn advise_requires_planting_date() {
        assert!(Cli::try_parse_from(["plantops", "advise", "--crop", "Wheat"]).is_err());
    }
}
