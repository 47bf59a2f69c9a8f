use thiserror::Error;

/// Failure of a dashboard API call.
///
/// The dashboard only distinguishes transport/parse failures from
/// `success: false` business failures; every variant is shown inline by the
/// component that issued the request, next to a manual retry control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Business(String),

    #[error("Response did not include any data")]
    MissingData,

    /// The request was superseded and cancelled by the caller.
    #[error("Request cancelled")]
    Aborted,
}

impl ApiError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }

    /// Build an HTTP error, keeping server text short enough for an inline banner.
    pub fn http(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            "Unknown error".to_string()
        } else if trimmed.chars().count() > 200 {
            let short: String = trimmed.chars().take(200).collect();
            format!("{}…", short)
        } else {
            trimmed.to_string()
        };
        ApiError::Http { status, message }
    }
}

/// Local form validation failures, shown next to the offending form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("{0} must be a time in HH:MM format")]
    InvalidTime(String),

    #[error("{0}: closing time must be after opening time")]
    CloseBeforeOpen(String),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: u32, max: u32 },

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = ApiError::http(503, "  ");
        assert_eq!(err.to_string(), "Server error 503: Unknown error");

        let long = "x".repeat(300);
        match ApiError::http(500, &long) {
            ApiError::Http { message, .. } => assert_eq!(message.chars().count(), 201),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_business_error_shows_server_message() {
        assert_eq!(ApiError::Business("Plan expired".into()).to_string(), "Plan expired");
        assert!(ApiError::Aborted.is_aborted());
        assert!(!ApiError::MissingData.is_aborted());
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::Required("Business name").to_string(), "Business name is required");
        assert_eq!(
            ValidationError::OutOfRange { field: "Max call duration", min: 1, max: 60 }.to_string(),
            "Max call duration must be between 1 and 60"
        );
    }
}
