use thiserror::Error;

/// Errors that can occur in population box-model analysis.
#[derive(Error, Debug)]
pub enum PopulationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    #[error("Empty horizon: {0}")]
    EmptyHorizon(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

impl From<toml::de::Error> for PopulationError {
    fn from(e: toml::de::Error) -> Self {
        PopulationError::Config(e.to_string())
    }
}
