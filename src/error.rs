// Failure taxonomy for one feedback submission

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between sending the feedback and reading
/// the last chunk of the response. All variants end up on the same
/// user-visible path: the output pane is replaced by the error prefix and
/// this error's `Display` text.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Failed to send feedback request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Server responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Stream error: {0}")]
    Stream(#[from] std::io::Error),
}

impl FeedbackError {
    /// Text shown in place of the response when a submission fails.
    pub fn user_message(&self, prefix: &str) -> String {
        format!("{prefix}{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_includes_code_and_body() {
        let err = FeedbackError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "model unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("model unavailable"));
    }

    #[test]
    fn test_user_message_prepends_prefix() {
        let err = FeedbackError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        let msg = err.user_message("Sorry! ");
        assert!(msg.starts_with("Sorry! Server responded with status 502"));
    }

    #[test]
    fn test_io_errors_convert_to_stream_errors() {
        let err: FeedbackError = std::io::Error::other("connection reset").into();
        assert!(matches!(err, FeedbackError::Stream(_)));
        assert_eq!(err.to_string(), "Stream error: connection reset");
    }
}
