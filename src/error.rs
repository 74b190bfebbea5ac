/// Failures talking to the CareLoop backends or the browser around them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Local storage was unavailable or rejected a write.
    #[error("browser storage error: {0}")]
    Storage(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Client-side checks on the "ask us" form. The messages are shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FaqValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Question must be at least 10 characters long")]
    QuestionTooShort,
    #[error("Question must be less than 1000 characters")]
    QuestionTooLong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_message() {
        let err = ApiError::Status { status: 503, message: "down".into() };
        assert_eq!(err.to_string(), "request failed with status 503: down");
    }

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(FaqValidationError::MissingFields.to_string(), "Please fill in all fields");
        assert_eq!(
            FaqValidationError::QuestionTooLong.to_string(),
            "Question must be less than 1000 characters"
        );
    }
}
