use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZapError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("ZAP API error {code}: {message}")]
    ApiFailure { code: String, message: String },

    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Scanner,
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

impl ZapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ZapError::ApiError(_) => ErrorCategory::Network,
            ZapError::ApiFailure { .. } | ZapError::UnexpectedResponse { .. } => {
                ErrorCategory::Scanner
            }
            ZapError::ConfigValidationError { .. }
            | ZapError::InvalidConfigValueError { .. }
            | ZapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ZapError::IoError(_) | ZapError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // ZAP may still be starting up; a later attempt usually works
            ZapError::ApiError(e) if e.is_connect() || e.is_timeout() => ErrorSeverity::Medium,
            ZapError::ApiError(_) => ErrorSeverity::High,
            ZapError::ApiFailure { .. } | ZapError::UnexpectedResponse { .. } => {
                ErrorSeverity::High
            }
            ZapError::ConfigValidationError { .. }
            | ZapError::InvalidConfigValueError { .. }
            | ZapError::MissingConfigError { .. } => ErrorSeverity::High,
            ZapError::IoError(_) | ZapError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ZapError::ApiError(_) => {
                "Check that ZAP is running and listening on the configured proxy address"
            }
            ZapError::ApiFailure { .. } => {
                "Check the API key (Tools > Options > API in ZAP) and the request arguments"
            }
            ZapError::UnexpectedResponse { .. } => {
                "Make sure the proxy address points at ZAP and not at another service"
            }
            ZapError::ConfigValidationError { .. }
            | ZapError::InvalidConfigValueError { .. }
            | ZapError::MissingConfigError { .. } => {
                "Review the command-line flags and the configuration file"
            }
            ZapError::IoError(_) => "Check file permissions and available disk space",
            ZapError::SerializationError(_) => "The data could not be encoded or decoded as JSON",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ZapError::ApiError(e) if e.is_connect() => {
                "Could not connect to ZAP".to_string()
            }
            ZapError::ApiError(e) if e.is_timeout() => "ZAP did not answer in time".to_string(),
            ZapError::ApiFailure { code, message } => {
                format!("ZAP rejected the request ({}): {}", code, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ZapError>;
