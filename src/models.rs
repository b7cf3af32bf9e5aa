use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Body of `POST /api/write_with_ai`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub feedback: String,
}

impl FeedbackRequest {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub server_url: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds; no timeout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_error_prefix")]
    pub error_prefix: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_endpoint() -> String {
    "/api/write_with_ai".to_string()
}

fn default_placeholder() -> String {
    "Thinking...".to_string()
}

fn default_error_prefix() -> String {
    "Sorry, an error happened. Please try again later. \n\n ".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            endpoint: default_endpoint(),
            request_timeout: None,
            placeholder: default_placeholder(),
            error_prefix: default_error_prefix(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
