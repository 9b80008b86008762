use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript execution failed: {0}")]
    JavaScriptFailed(String),

    #[error("Element '{selector}' not visible within {timeout_ms}ms")]
    ElementTimeout { selector: String, timeout_ms: u64 },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Heading mismatch: expected text containing '{expected}', page shows '{actual}'")]
    HeadingMismatch { expected: String, actual: String },

    #[error("No table with caption containing '{caption}'")]
    TableNotFound { caption: String },

    #[error("No table row matching '{label}'")]
    RowNotFound { label: String },

    #[error("No percentage cell in row '{label}'; row text: '{row_text}'")]
    PercentCellNotFound { label: String, row_text: String },

    #[error("Could not parse a percentage from text: '{text}'")]
    PercentParse { text: String },

    #[error("Measured {measured}% is outside {expected}% ± {tolerance}% (source text: '{source_text}')")]
    OutsideTolerance {
        measured: f64,
        expected: f64,
        tolerance: f64,
        source_text: String,
    },

    #[error("Measured {measured}% falls inside the forbidden range {min}%-{max}% (source text: '{source_text}')")]
    InsideExclusion {
        measured: f64,
        min: f64,
        max: f64,
        source_text: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Anyhow error: {0}")]
    AnyhowError(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;

// Convert anyhow::Error to CheckError
impl From<anyhow::Error> for CheckError {
    fn from(err: anyhow::Error) -> Self {
        CheckError::AnyhowError(err.to_string())
    }
}
