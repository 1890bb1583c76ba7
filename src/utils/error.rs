use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
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

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Unprocessable request body: {message}")]
    DecodeError { message: String },

    #[error("card {id} not found")]
    CardNotFound { id: i64 },

    #[error("pokemon '{name}' not found")]
    PokemonNotFound { name: String },

    #[error("FizzBuzz worker channel closed")]
    ChannelClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Validation,
    NotFound,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 輸入或設定錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ApiError(_) => ErrorCategory::Network,
            AppError::CsvError(_) | AppError::SerializationError(_) | AppError::DecodeError { .. } => {
                ErrorCategory::Data
            }
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::ValidationError { .. } => ErrorCategory::Validation,
            AppError::CardNotFound { .. } | AppError::PokemonNotFound { .. } => {
                ErrorCategory::NotFound
            }
            AppError::IoError(_) | AppError::ChannelClosed => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Validation | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::ApiError(_) => "Check your network connection and the API base URL, then retry",
            AppError::CsvError(_) => "Make sure the cart file has a 'product,quantity,price' header",
            AppError::IoError(_) => "Check that the file exists and is readable",
            AppError::SerializationError(_) | AppError::DecodeError { .. } => {
                "Send a well-formed JSON document"
            }
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file and the command line flags"
            }
            AppError::ValidationError { .. } => "Fix the reported fields and try again",
            AppError::CardNotFound { .. } => "List the cards to find a valid id",
            AppError::PokemonNotFound { .. } => "Check the spelling of the pokemon name",
            AppError::ChannelClosed => "Spawn a new FizzBuzz worker",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ApiError(_) => "Could not talk to the remote API".to_string(),
            AppError::PokemonNotFound { name } => format!("No pokemon called '{}'", name),
            AppError::CardNotFound { id } => format!("Card {} does not exist", id),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_low_severity() {
        let err = AppError::CardNotFound { id: 7 };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Card 7 does not exist");
    }

    #[test]
    fn test_severity_exit_codes() {
        let table = [
            (AppError::PokemonNotFound { name: "missingno".to_string() }, 0),
            (AppError::validation("name: bad"), 1),
            (AppError::config("broken"), 1),
            (AppError::ChannelClosed, 3),
        ];
        for (err, expected) in table {
            assert_eq!(err.severity().exit_code(), expected, "{}", err);
        }
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = AppError::InvalidConfigValueError {
            field: "server.bind".to_string(),
            value: "nowhere".to_string(),
            reason: "Invalid socket address".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("server.bind"));

        let parse = AppError::config("expected `=`");
        let field = AppError::ConfigValidationError {
            field: "cards".to_string(),
            message: "default_per_page exceeds max_per_page".to_string(),
        };
        for err in [parse, field] {
            assert_eq!(err.category(), ErrorCategory::Configuration, "{}", err);
        }
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
