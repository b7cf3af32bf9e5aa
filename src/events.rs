// Event types for async communication

use tokio::sync::mpsc::UnboundedSender;

use crate::streamer::OutputSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputUpdate {
    Replace(String),
    Append(String),
}

/// Every event carries the generation of the submission that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A change to the story output
    Output { generation: u64, update: OutputUpdate },
    /// The submission task ended, successfully or not
    Finished { generation: u64 },
}

/// Forwards display updates from a submission task to the UI loop.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    generation: u64,
    tx: UnboundedSender<AppEvent>,
}

impl ChannelSink {
    pub const fn new(generation: u64, tx: UnboundedSender<AppEvent>) -> Self {
        Self { generation, tx }
    }

    fn send(&self, update: OutputUpdate) {
        // The receiver only goes away when the app is shutting down
        let _ = self.tx.send(AppEvent::Output {
            generation: self.generation,
            update,
        });
    }
}

impl OutputSink for ChannelSink {
    fn replace(&mut self, text: &str) {
        self.send(OutputUpdate::Replace(text.to_string()));
    }

    fn append(&mut self, text: &str) {
        self.send(OutputUpdate::Append(text.to_string()));
    }
}
