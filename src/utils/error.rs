use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylistError {
    #[error("No wardrobe found for user: {user}")]
    UserNotFound { user: String },

    #[error("City '{location}' not found. OpenWeatherMap Error: {message}")]
    LocationNotFound { location: String, message: String },

    #[error("Failed to fetch weather data: {message}")]
    WeatherUnavailable { message: String },

    #[error("Failed to parse outfit recommendation: {reason}")]
    GenerationParse { reason: String, raw: String },

    #[error("Text generation returned non-success status {status}: {body}")]
    GenerationFailed { status: u16, body: String },

    #[error("Object not found: {path}")]
    ObjectNotFound { path: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Upstream,
    Storage,
    Generation,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StylistError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StylistError::ConfigError { .. }
            | StylistError::ConfigValidationError { .. }
            | StylistError::InvalidConfigValueError { .. }
            | StylistError::MissingConfigError { .. } => ErrorCategory::Configuration,
            StylistError::UserNotFound { .. } | StylistError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            StylistError::LocationNotFound { .. }
            | StylistError::WeatherUnavailable { .. }
            | StylistError::ApiError(_) => ErrorCategory::Upstream,
            StylistError::ObjectNotFound { .. } | StylistError::IoError(_) => {
                ErrorCategory::Storage
            }
            StylistError::GenerationParse { .. } | StylistError::GenerationFailed { .. } => {
                ErrorCategory::Generation
            }
            StylistError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 上游服務可能只是暫時失敗，重試即可
            ErrorCategory::Upstream | ErrorCategory::Generation => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StylistError::UserNotFound { user } => format!(
                "Add a wardrobe file named '{}_metadata.json' to the data directory",
                user.to_lowercase()
            ),
            StylistError::LocationNotFound { .. } => {
                "Mention the city by name, e.g. 'dinner in Boston tomorrow'".to_string()
            }
            StylistError::WeatherUnavailable { .. } => {
                "Retry later, or pass --celsius to skip the weather lookup".to_string()
            }
            StylistError::GenerationParse { .. } | StylistError::GenerationFailed { .. } => {
                "Retry the request; the language model reply was not usable".to_string()
            }
            StylistError::ApiError(_) => "Check network connectivity and API keys".to_string(),
            StylistError::ObjectNotFound { .. } | StylistError::IoError(_) => {
                "Check that the data directory exists and is readable".to_string()
            }
            StylistError::ConfigError { .. }
            | StylistError::ConfigValidationError { .. }
            | StylistError::InvalidConfigValueError { .. }
            | StylistError::MissingConfigError { .. } => {
                "Review stylist.toml or the environment variables it references".to_string()
            }
            StylistError::ValidationError { .. } => {
                "Fix the request fields and try again".to_string()
            }
            StylistError::SerializationError(_) => {
                "Check the wardrobe JSON files for syntax errors".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StylistError::UserNotFound { user } => {
                format!("We couldn't find a wardrobe for '{}'", user)
            }
            StylistError::LocationNotFound { location, .. } => {
                format!("We couldn't find the weather for '{}'", location)
            }
            StylistError::WeatherUnavailable { .. } => {
                "The weather service is not available right now".to_string()
            }
            StylistError::GenerationParse { .. } | StylistError::GenerationFailed { .. } => {
                "The outfit recommendation could not be produced".to_string()
            }
            StylistError::ValidationError { message } => format!("Invalid request: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StylistError>;
