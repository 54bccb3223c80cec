use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantOpsError {
    #[error("Crop '{0}' not recognized for optimal planting schedule.")]
    InvalidCrop(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InsufficientData(String),

    #[error("{0}")]
    UpstreamFailure(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Could not find coordinates for '{0}'.")]
    LocationNotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, PlantOpsError>;

impl PlantOpsError {
    /// Error payload for front ends.
    pub fn into_payload<T>(self) -> crate::models::Payload<T> {
        crate::models::Payload::Error {
            error: self.to_string(),
        }
    }
}
