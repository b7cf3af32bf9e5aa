// Client for the "write with AI" endpoint

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::stream::{Stream, StreamExt, TryStreamExt};
use reqwest::{Client, Response};
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

use crate::error::FeedbackError;
use crate::models::{AppConfig, FeedbackRequest};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);
/// Bytes of an error response kept for the message
const ERROR_BODY_LIMIT: usize = 4096;
const ERROR_BODY_TIMEOUT: Duration = Duration::from_secs(2);

/// Raw response body, chunked however the transport delivered it.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, FeedbackError>> + Send>>;

#[derive(Debug, Clone)]
pub struct FeedbackClient {
    base_url: String,
    endpoint: String,
    client: Client,
}

impl FeedbackClient {
    pub fn new(base_url: String, endpoint: String, request_timeout: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            endpoint,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.server_url.clone(),
            config.endpoint.clone(),
            config.request_timeout,
        )
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    /// Send the feedback and hand back the response body as a byte stream.
    ///
    /// Resolves once the response headers arrive. A non-success status is an
    /// error; its body (if readable) is folded into the error.
    pub async fn write_with_ai(&self, feedback: &str) -> Result<ByteStream, FeedbackError> {
        let url = self.endpoint_url();
        debug!(%url, bytes = feedback.len(), "sending feedback");

        let response = self
            .client
            .post(&url)
            .json(&FeedbackRequest::new(feedback))
            .send()
            .await
            .map_err(FeedbackError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = read_error_body(response).await;
            return Err(FeedbackError::Status { status, body });
        }

        debug!(status = %response.status(), "response headers received");

        let stream = response
            .bytes_stream()
            .map_err(|err| FeedbackError::Stream(std::io::Error::other(err)));

        Ok(Box::pin(stream))
    }

    /// Whether anything answers at the server's base URL.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(&self.base_url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
            .is_ok()
    }
}

/// Read at most `ERROR_BODY_LIMIT` bytes of a failed response, giving up
/// after `ERROR_BODY_TIMEOUT`. Whatever arrived by then is kept.
async fn read_error_body(response: Response) -> String {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    let read = async {
        while body.len() < ERROR_BODY_LIMIT {
            match stream.next().await {
                Some(Ok(chunk)) => body.extend_from_slice(&chunk),
                _ => break,
            }
        }
    };
    if tokio::time::timeout(ERROR_BODY_TIMEOUT, read).await.is_err() {
        debug!("gave up reading error body");
    }

    body.truncate(ERROR_BODY_LIMIT);
    String::from_utf8_lossy(&body).trim().to_string()
}
