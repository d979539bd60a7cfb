use thiserror::Error;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("failed to generate itinerary: no JSON object found in model response")]
    NoJsonFound,

    #[error("failed to generate itinerary: malformed JSON in model response: {message}")]
    MalformedJson { message: String, candidate: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether asking the model again (or retrying the request) can help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::NoJsonFound
                | PlannerError::MalformedJson { .. }
                | PlannerError::Validation(_)
                | PlannerError::RateLimit { .. }
                | PlannerError::Timeout(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::NoJsonFound => "NO_JSON_FOUND",
            PlannerError::MalformedJson { .. } => "MALFORMED_JSON",
            PlannerError::InvalidArgument(_) => "INVALID_ARGUMENT",
            PlannerError::Geocoding(_) => "GEOCODING_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// The substring handed to the JSON parser, when there was one.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            PlannerError::MalformedJson { candidate, .. } => Some(candidate),
            _ => None,
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_errors_are_user_facing() {
        let err = PlannerError::NoJsonFound;
        assert!(err.to_string().starts_with("failed to generate itinerary"));
        assert_eq!(err.error_code(), "NO_JSON_FOUND");
        assert!(err.candidate().is_none());

        let err = PlannerError::MalformedJson {
            message: "EOF while parsing an object".to_string(),
            candidate: "{\"a\":".to_string(),
        };
        assert_eq!(err.candidate(), Some("{\"a\":"));
        assert!(err.to_string().contains("EOF while parsing"));
    }

    #[test]
    fn payload_shape() {
        let payload = PlannerError::InvalidArgument("empty route".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "INVALID_ARGUMENT");
        assert_eq!(payload["error"]["retryable"], false);
        assert_eq!(
            payload["error"]["message"],
            "Invalid argument: empty route"
        );
    }
}
