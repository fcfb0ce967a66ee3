use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpectraError {
    #[error("No spectral channel configured; define at least one of f1..f8")]
    NoChannelsConfigured,

    #[error("At least one spectral reading is required for interpolation")]
    NoReadings,

    #[error("Sample count must be at least 1")]
    InvalidSampleCount,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
