use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Classifier backend not available")]
    ClassifierUnavailable,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersionMismatch { found: u8, expected: u8 },
}

impl ScoringError {
    /// Whether the caller can fall back and continue without this result.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScoringError::MissingField { .. } => false,
            ScoringError::InvalidValue { .. } => false,
            ScoringError::ClassifierUnavailable => false,
            ScoringError::Serialization(_) => true,
            ScoringError::SchemaVersionMismatch { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
