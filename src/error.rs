use thiserror::Error;

pub type RaceResult<T> = Result<T, RaceChartError>;

#[derive(Debug, Error)]
pub enum RaceChartError {
    #[error("data format error: {0}")]
    DataFormat(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
