// Submit feedback and render the streamed answer as it arrives

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::api::FeedbackClient;
use crate::decoder::Utf8StreamDecoder;
use crate::error::FeedbackError;
use crate::models::AppConfig;

/// Where the response text goes. The terminal UI implements this over a
/// channel; tests record every state the display passes through.
pub trait OutputSink {
    fn replace(&mut self, text: &str);
    fn append(&mut self, text: &str);
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input was blank; nothing was sent and the display was not touched
    Skipped,
    Completed,
    Failed(FeedbackError),
}

pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

#[derive(Debug, Clone)]
pub struct Streamer {
    client: FeedbackClient,
    placeholder: String,
    error_prefix: String,
}

impl Streamer {
    pub fn new(client: FeedbackClient, config: &AppConfig) -> Self {
        Self {
            client,
            placeholder: config.placeholder.clone(),
            error_prefix: config.error_prefix.clone(),
        }
    }

    pub fn endpoint_url(&self) -> String {
        self.client.endpoint_url()
    }

    /// Run one full submission: placeholder, request, incremental render,
    /// or the error message if anything fails along the way.
    pub async fn submit(&self, input: &str, sink: &mut impl OutputSink) -> SubmitOutcome {
        if is_blank(input) {
            debug!("blank feedback, nothing to submit");
            return SubmitOutcome::Skipped;
        }

        sink.replace(&self.placeholder);
        let opened = self.client.write_with_ai(input).await;
        self.show_response(opened, sink).await
    }

    /// Everything after the request resolved: clear the placeholder and
    /// stream into the sink, or replace the display with the failure.
    async fn show_response<S>(
        &self,
        opened: Result<S, FeedbackError>,
        sink: &mut impl OutputSink,
    ) -> SubmitOutcome
    where
        S: Stream<Item = Result<Bytes, FeedbackError>> + Unpin,
    {
        let result = match opened {
            Ok(stream) => {
                sink.replace("");
                render_stream(stream, sink).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(bytes) => {
                info!(bytes, "response stream finished");
                SubmitOutcome::Completed
            }
            Err(err) => {
                warn!(error = %err, "feedback submission failed");
                sink.replace(&err.user_message(&self.error_prefix));
                SubmitOutcome::Failed(err)
            }
        }
    }
}

/// Append each decoded chunk to the sink as soon as it arrives. Returns the
/// number of body bytes consumed. Stops at the first stream error.
pub async fn render_stream<S>(mut stream: S, sink: &mut impl OutputSink) -> Result<usize, FeedbackError>
where
    S: Stream<Item = Result<Bytes, FeedbackError>> + Unpin,
{
    let mut decoder = Utf8StreamDecoder::new();
    let mut total = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total += chunk.len();
        let text = decoder.decode(&chunk);
        if !text.is_empty() {
            sink.append(&text);
        }
    }

    if decoder.pending_len() > 0 {
        warn!(
            bytes = decoder.pending_len(),
            "stream ended inside a multi-byte character"
        );
    }
    let tail = decoder.finish();
    if !tail.is_empty() {
        sink.append(&tail);
    }

    Ok(total)
}
