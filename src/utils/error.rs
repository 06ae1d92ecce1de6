use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pricing service returned HTTP {status}")]
    PricingStatusError { status: u16 },

    #[error("Pricing response is missing field '{field}'")]
    MissingFieldError { field: String },

    #[error("Pricing service unavailable: {message}")]
    PricingUnavailableError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Pricing,
    Configuration,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SimError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SimError::HttpError(_) => ErrorCategory::Network,
            SimError::PricingStatusError { .. }
            | SimError::MissingFieldError { .. }
            | SimError::PricingUnavailableError { .. } => ErrorCategory::Pricing,
            SimError::ConfigError { .. }
            | SimError::ConfigValidationError { .. }
            | SimError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SimError::ValidationError { .. } => ErrorCategory::Validation,
            SimError::IoError(_) | SimError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // pricing failures always degrade to a fallback rate
            ErrorCategory::Pricing => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SimError::HttpError(e) if e.is_timeout() => {
                "The pricing service timed out; raise --timeout-seconds or try again later".to_string()
            }
            SimError::HttpError(_) => {
                "Check network connectivity and the --pricing-endpoint value".to_string()
            }
            SimError::PricingStatusError { status } if *status >= 500 => {
                "The pricing service is having problems; the fallback rate table is used meanwhile".to_string()
            }
            SimError::PricingStatusError { .. } => {
                "Verify the pricing endpoint and any required headers in the config file".to_string()
            }
            SimError::MissingFieldError { field } => {
                format!("The pricing service response must contain a numeric '{}' field", field)
            }
            SimError::PricingUnavailableError { .. } => {
                "Check --pricing-endpoint or raise --timeout-seconds; pin --pricing to skip the lookup".to_string()
            }
            SimError::ConfigError { .. } | SimError::ConfigValidationError { .. } => {
                "Check the TOML config file syntax and section names".to_string()
            }
            SimError::InvalidConfigValueError { field, .. } => {
                format!("Adjust '{}' to a value inside its allowed range", field)
            }
            SimError::ValidationError { .. } => {
                "Run with --help to see the allowed value ranges".to_string()
            }
            SimError::IoError(_) => "Check that the file exists and is readable".to_string(),
            SimError::SerializationError(_) => {
                "The data could not be encoded; re-run with --verbose for details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the pricing service: {}", self),
            ErrorCategory::Pricing => format!("Live pricing unavailable: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_errors_are_low_severity() {
        let err = SimError::PricingStatusError { status: 503 };
        assert_eq!(err.category(), ErrorCategory::Pricing);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = SimError::InvalidConfigValueError {
            field: "staffing".to_string(),
            value: "80".to_string(),
            reason: "Value must be between 5 and 50".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("staffing"));
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_missing_field_message() {
        let err = SimError::MissingFieldError {
            field: "average_hourly_rate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Pricing response is missing field 'average_hourly_rate'"
        );
    }
}
