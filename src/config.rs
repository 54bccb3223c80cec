use crate::error::{PlantOpsError, Result};
use crate::models::Crop;
use chrono::NaiveDate;
use dialoguer::{Input, Password, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CEHUB_BASE_URL: &str = "https://services.cehub.syngenta-ais.com";
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub farm: FarmConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub cehub: Option<CeHubConfig>,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub town: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub crop: Option<String>,
    pub field_size_acres: Option<f64>,
}

impl FarmConfig {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            name: "Main Field".into(),
            town: None,
            latitude: None,
            longitude: None,
            crop: None,
            field_size_acres: None,
        }
    }
}

/// Where the candidate-period weather comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    #[default]
    Historical,
    Forecast,
    File,
}

impl WeatherSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::Historical => "historical",
            WeatherSource::Forecast => "forecast",
            WeatherSource::File => "file",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "historical" | "history" => Some(WeatherSource::Historical),
            "forecast" => Some(WeatherSource::Forecast),
            "file" => Some(WeatherSource::File),
            _ => None,
        }
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub source: WeatherSource,
    #[serde(default = "default_candidate_start")]
    pub candidate_start: NaiveDate,
    #[serde(default = "default_candidate_end")]
    pub candidate_end: NaiveDate,
    #[serde(default = "default_history_years")]
    pub history_years: u32,
    pub file: Option<PathBuf>,
}

fn default_candidate_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default()
}

fn default_candidate_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 30).unwrap_or_default()
}

fn default_history_years() -> u32 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            source: WeatherSource::Historical,
            candidate_start: default_candidate_start(),
            candidate_end: default_candidate_end(),
            history_years: default_history_years(),
            file: None,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct CeHubConfig {
    pub api_key: String,
    #[serde(default = "default_supplier")]
    pub supplier: String,
    #[serde(default = "default_cehub_url")]
    pub base_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_supplier() -> String {
    "Meteoblue".into()
}

fn default_cehub_url() -> String {
    CEHUB_BASE_URL.into()
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for CeHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CeHubConfig")
            .field("api_key", &"[REDACTED]")
            .field("supplier", &self.supplier)
            .field("base_url", &self.base_url)
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoder_url() -> String {
    NOMINATIM_BASE_URL.into()
}

fn default_user_agent() -> String {
    "optimal_planting_app".into()
}

fn default_timeout_secs() -> u64 {
    7
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: default_geocoder_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn input_error(e: dialoguer::Error) -> PlantOpsError {
    PlantOpsError::Config(format!("Input error: {}", e))
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(PlantOpsError::Config(format!(
                "Config file not found at {:?}. Run `plantops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| PlantOpsError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Parse YAML after substituting `${VAR}` placeholders.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| PlantOpsError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config if one exists, otherwise fall back to defaults.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            Self::load(config_override)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(crop) = &self.farm.crop {
            if Crop::from_str(crop).is_none() {
                return Err(PlantOpsError::Config(format!(
                    "farm.crop '{}' is not one of: {}",
                    crop,
                    Crop::names()
                )));
            }
        }
        if let Some(size) = self.farm.field_size_acres {
            if size.is_nan() || size <= 0.0 {
                return Err(PlantOpsError::Config(format!(
                    "farm.field_size_acres must be positive, got {}",
                    size
                )));
            }
        }
        if self.farm.latitude.is_some() != self.farm.longitude.is_some() {
            return Err(PlantOpsError::Config(
                "farm.latitude and farm.longitude must be set together".into(),
            ));
        }
        if self.weather.candidate_end < self.weather.candidate_start {
            return Err(PlantOpsError::Config(
                "weather.candidate_end is before weather.candidate_start".into(),
            ));
        }
        if self.weather.source == WeatherSource::File && self.weather.file.is_none() {
            return Err(PlantOpsError::Config(
                "weather.source is 'file' but weather.file is not set".into(),
            ));
        }
        Ok(())
    }

    /// CE Hub settings when present, enabled and keyed. An unsubstituted
    /// `${VAR}` key counts as missing.
    pub fn active_cehub(&self) -> Option<&CeHubConfig> {
        self.cehub
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty() && !c.api_key.starts_with("${"))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("plantops").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/plantops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlantOpsError::Config("Cannot determine config directory".into()))?
            .join("plantops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up PlantOps!");
        println!();

        println!("Farm");
        let name: String = Input::new()
            .with_prompt("  Farm name")
            .default("Main Field".into())
            .interact_text()
            .map_err(input_error)?;

        let crops = Crop::all();
        let crop_idx = Select::new()
            .with_prompt("  Default crop")
            .items(&crops.iter().map(|c| c.as_str()).collect::<Vec<_>>())
            .default(0)
            .interact()
            .map_err(input_error)?;

        let field_size_acres: f64 = Input::new()
            .with_prompt("  Field size (acres)")
            .default(10.0)
            .validate_with(|v: &f64| {
                if *v > 0.0 {
                    Ok(())
                } else {
                    Err("must be positive")
                }
            })
            .interact_text()
            .map_err(input_error)?;

        let town: String = Input::new()
            .with_prompt("  Town (leave blank to enter coordinates later)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        println!();

        println!("Weather");
        let sources = [WeatherSource::Historical, WeatherSource::Forecast];
        let source_idx = Select::new()
            .with_prompt("  Source")
            .items(&sources.iter().map(|s| s.as_str()).collect::<Vec<_>>())
            .default(0)
            .interact()
            .map_err(input_error)?;

        println!();

        println!("CE Hub forecast (leave API key blank to skip)");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_error)?;

        let cehub = if api_key.is_empty() {
            None
        } else {
            Some(CeHubConfig {
                api_key,
                supplier: default_supplier(),
                base_url: default_cehub_url(),
                enabled: true,
            })
        };

        println!();

        let config = Config {
            farm: FarmConfig {
                name,
                town: (!town.is_empty()).then_some(town),
                latitude: None,
                longitude: None,
                crop: Some(crops[crop_idx].as_str().to_string()),
                field_size_acres: Some(field_size_acres),
            },
            weather: WeatherConfig {
                source: sources[source_idx],
                ..WeatherConfig::default()
            },
            cehub,
            geocoder: GeocoderConfig::default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| PlantOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# PlantOps Configuration\n# Generated by `plantops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
