use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoseError {
    #[error("Invalid numeric input for '{field}': {value:?}")]
    InvalidNumericInput { field: String, value: String },

    #[error("Invalid time input for '{field}': {value:?} (expected HH:MM)")]
    InvalidTimeInput { field: String, value: String },

    #[error("Unknown nuclide: {value:?}")]
    UnknownNuclide { value: String },

    #[error("Invalid request body: {message}")]
    InvalidRequestBody { message: String },

    #[error("Half-life must be a positive number of minutes, got {value}")]
    InvalidHalfLife { value: f64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DoseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DoseError::InvalidNumericInput { .. }
            | DoseError::InvalidTimeInput { .. }
            | DoseError::UnknownNuclide { .. }
            | DoseError::InvalidRequestBody { .. }
            | DoseError::InvalidHalfLife { .. } => ErrorCategory::Input,
            DoseError::ConfigError { .. } => ErrorCategory::Configuration,
            DoseError::IoError(_)
            | DoseError::SerializationError(_)
            | DoseError::CsvError(_)
            | DoseError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Short machine-readable name, used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            DoseError::InvalidNumericInput { .. } => "invalid_numeric_input",
            DoseError::InvalidTimeInput { .. } => "invalid_time_input",
            DoseError::UnknownNuclide { .. } => "unknown_nuclide",
            DoseError::InvalidRequestBody { .. } => "invalid_request_body",
            DoseError::InvalidHalfLife { .. } => "invalid_half_life",
            DoseError::ConfigError { .. } => "config_error",
            DoseError::IoError(_) => "io_error",
            DoseError::SerializationError(_) => "serialization_error",
            DoseError::CsvError(_) => "csv_error",
            DoseError::ServerError { .. } => "server_error",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DoseError::InvalidNumericInput { field, value } => {
                format!("Field '{}' is not a valid number: {:?}", field, value)
            }
            DoseError::InvalidTimeInput { field, value } => {
                format!("Field '{}' is not a valid HH:MM time: {:?}", field, value)
            }
            DoseError::UnknownNuclide { value } => format!("Unsupported nuclide {:?}", value),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DoseError::InvalidNumericInput { .. } => {
                "Enter a plain decimal number such as 178.8"
            }
            DoseError::InvalidTimeInput { .. } => "Enter the time as HH:MM, for example 07:50",
            DoseError::UnknownNuclide { .. } => "Choose one of the supported nuclides: F18, C11",
            DoseError::InvalidRequestBody { .. } => {
                "Send a JSON object with nuclide, dose, init_activity, init_volume, start_time and target_time"
            }
            DoseError::InvalidHalfLife { .. } => "Use a nuclide with a positive half-life",
            DoseError::ConfigError { .. } => "Check the TOML configuration file and CLI flags",
            DoseError::IoError(_) => "Check file paths and permissions",
            DoseError::SerializationError(_) | DoseError::CsvError(_) => {
                "Try another output format"
            }
            DoseError::ServerError { .. } => "Check that the listen address is free",
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DoseError>;
