use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("API returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("CSV import error: {message}")]
    CsvImportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Authentication,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HubError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            // 回應已收到但內容不是預期的 JSON
            HubError::HttpError(e) if e.is_decode() => ErrorCategory::Api,
            HubError::HttpError(_) => ErrorCategory::Network,
            HubError::Status { .. } | HubError::NotFound { .. } => ErrorCategory::Api,
            HubError::Unauthorized { .. }
            | HubError::NotAuthenticated
            | HubError::InvalidPassword => ErrorCategory::Authentication,
            HubError::ConfigError { .. }
            | HubError::ConfigValidationError { .. }
            | HubError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            HubError::CsvError(_)
            | HubError::ValidationError { .. }
            | HubError::CsvImportError { .. } => ErrorCategory::Input,
            HubError::IoError(_) | HubError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤或伺服器 5xx 通常可以重試
            HubError::HttpError(_) => ErrorSeverity::Medium,
            HubError::Status { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            HubError::Status { .. } | HubError::NotFound { .. } => ErrorSeverity::High,
            HubError::Unauthorized { .. }
            | HubError::NotAuthenticated
            | HubError::InvalidPassword => ErrorSeverity::High,
            HubError::ConfigError { .. }
            | HubError::ConfigValidationError { .. }
            | HubError::InvalidConfigValueError { .. }
            | HubError::ValidationError { .. }
            | HubError::CsvError(_)
            | HubError::CsvImportError { .. } => ErrorSeverity::High,
            HubError::IoError(_) | HubError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            HubError::HttpError(e) if e.is_timeout() => {
                "The faculty hub API did not respond in time".to_string()
            }
            HubError::HttpError(e) if e.is_connect() => {
                "Could not connect to the faculty hub API".to_string()
            }
            HubError::HttpError(e) if e.is_decode() => {
                "The faculty hub API returned a response body that could not be read".to_string()
            }
            HubError::HttpError(_) => "Network request to the faculty hub API failed".to_string(),
            HubError::Status { status, detail } => {
                format!("The API rejected the request ({}): {}", status, detail)
            }
            HubError::Unauthorized { .. } => "Your admin session is no longer valid".to_string(),
            HubError::NotFound { resource } => format!("{} not found", resource),
            HubError::NotAuthenticated => "Admin login required".to_string(),
            HubError::InvalidPassword => "Invalid password".to_string(),
            HubError::CsvImportError { message } => message.clone(),
            HubError::CsvError(e) => format!("Failed to parse CSV file: {}", e),
            HubError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the API server is running and that --api-url points at it".to_string()
            }
            ErrorCategory::Api => "Check the id or the submitted values and try again".to_string(),
            ErrorCategory::Authentication => {
                "Run `faculty-hub admin login` and retry the command".to_string()
            }
            ErrorCategory::Configuration => {
                "Fix the configuration file or the command-line overrides".to_string()
            }
            ErrorCategory::Input => "Correct the input and run the command again".to_string(),
            ErrorCategory::System => {
                "Check file permissions and available disk space".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_errors_share_category() {
        assert_eq!(HubError::NotAuthenticated.category(), ErrorCategory::Authentication);
        assert_eq!(HubError::InvalidPassword.category(), ErrorCategory::Authentication);
        assert_eq!(
            HubError::Unauthorized {
                detail: "expired".to_string()
            }
            .category(),
            ErrorCategory::Authentication
        );
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let err = HubError::Status {
            status: 503,
            detail: "down".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = HubError::Status {
            status: 422,
            detail: "bad email".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_csv_import_message_is_shown_verbatim() {
        let err = HubError::CsvImportError {
            message: "CSV file must have at least a header row and one data row".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "CSV file must have at least a header row and one data row"
        );
    }
}
