use thiserror::Error;

#[derive(Error, Debug)]
pub enum NobelError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Columns {sources:?} would all be renamed to '{target}'")]
    ColumnCollision { target: String, sources: Vec<String> },
}

impl NobelError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NobelError::ApiError(_) => {
                "Check your network connection and that the API base URL is reachable"
            }
            NobelError::SerializationError(_) => {
                "The API did not return JSON; check the base URL and endpoint"
            }
            NobelError::IoError(_) | NobelError::ZipError(_) | NobelError::CsvError(_) => {
                "Check that the output path exists and is writable"
            }
            NobelError::ConfigError { .. }
            | NobelError::InvalidConfigValueError { .. }
            | NobelError::ValidationError { .. } => "Fix the configuration value and try again",
            NobelError::ProcessingError { .. } => {
                "Inspect the raw response; the API may have returned an error payload"
            }
            NobelError::ColumnCollision { .. } => {
                "Run with --raw-columns to keep the original column names"
            }
        }
    }

    /// Process exit code used by the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            NobelError::ConfigError { .. }
            | NobelError::InvalidConfigValueError { .. }
            | NobelError::ValidationError { .. } => 1,
            NobelError::ApiError(_) | NobelError::SerializationError(_) => 2,
            NobelError::ProcessingError { .. } | NobelError::ColumnCollision { .. } => 3,
            NobelError::IoError(_) | NobelError::ZipError(_) | NobelError::CsvError(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, NobelError>;
