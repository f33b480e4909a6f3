use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicketOfficeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{service} service answered {status}: {body}")]
    UnexpectedResponse {
        service: String,
        status: u16,
        body: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid seat count: {value:?}")]
    InvalidSeatCount { value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Request,
    Data,
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

impl TicketOfficeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::UnexpectedResponse { .. } => ErrorCategory::Network,
            Self::InvalidSeatCount { .. } => ErrorCategory::Request,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            // 外部服務暫時不可用，通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => {
                "A train service did not answer in time".to_string()
            }
            Self::ApiError(e) if e.is_connect() => {
                "Could not connect to a train service".to_string()
            }
            Self::ApiError(_) => "A request to a train service failed".to_string(),
            Self::UnexpectedResponse {
                service, status, ..
            } => format!("The {} service rejected the request (HTTP {})", service, status),
            Self::InvalidSeatCount { value } => {
                format!("'{}' is not a valid number of seats", value)
            }
            Self::SerializationError(_) => {
                "A train service returned data that could not be read".to_string()
            }
            Self::IoError(e) => format!("File system error: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the train data and booking reference services are running and reachable"
            }
            ErrorCategory::Request => "Pass the seat count as a non-negative whole number",
            ErrorCategory::Data => "Check that the train data service speaks the expected JSON format",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags and retry",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, TicketOfficeError>;
