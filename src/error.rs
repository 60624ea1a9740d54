use reqwest::StatusCode;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Input failed advisory validation (blocks submission, never pricing)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Backend answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
    /// HTTP request error (preserves reqwest::Error for failure classification)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// JSON/TOML (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Filesystem error while reading drafts or config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Short machine-readable name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::Upstream { .. } => "upstream_error",
            Self::HttpRequest(_) => "http_request_error",
            Self::Serialization(_) => "serialization_error",
            Self::Io(_) => "io_error",
        }
    }

    /// Whether the failure looks like a backend/network outage rather than a
    /// problem with the estimate itself.
    ///
    /// ## Transient (returns true):
    /// - Connection failures and request timeouts
    /// - HTTP 5xx answers from the backend
    ///
    /// ## NOT transient (returns false):
    /// - HTTP 4xx answers (the backend rejected the payload or credentials)
    /// - Validation, configuration and serialization errors
    ///
    /// Nothing retries automatically; the CLI uses this to tell the user
    /// whether simply resubmitting is worth a try.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(e) => {
                if e.is_connect() || e.is_timeout() {
                    return true;
                }
                e.status().is_some_and(|s| s.is_server_error())
            }
            Self::Upstream { status, .. } => status.is_server_error(),
            Self::Config(_) | Self::InvalidInput(_) | Self::Serialization(_) | Self::Io(_) => {
                false
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(format!("TOML error: {}", err))
    }
}

impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::InvalidInput("square footage is required".to_string());
        assert_eq!(error.to_string(), "Invalid input: square footage is required");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(AppError::Config("x".to_string()).kind(), "config_error");
        assert_eq!(
            AppError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                message: "down".to_string()
            }
            .kind(),
            "upstream_error"
        );
    }

    #[test]
    fn test_is_transient_5xx() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            let error = AppError::Upstream {
                status,
                message: "backend unavailable".to_string(),
            };
            assert!(error.is_transient(), "{} should be transient", status);
        }
    }

    #[test]
    fn test_is_transient_4xx() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            let error = AppError::Upstream {
                status,
                message: "rejected".to_string(),
            };
            assert!(!error.is_transient(), "{} should not be transient", status);
        }
    }

    #[test]
    fn test_is_transient_local_errors() {
        assert!(!AppError::InvalidInput("discount".to_string()).is_transient());
        assert!(!AppError::Config("base_url".to_string()).is_transient());
        assert!(!AppError::Serialization("bad".to_string()).is_transient());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Serialization(msg) if msg.starts_with("JSON error")));
    }
}
