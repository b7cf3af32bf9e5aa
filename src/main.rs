mod api;
mod app;
mod config;
mod decoder;
mod error;
mod events;
mod logging;
mod models;
mod screen;
mod streamer;
mod ui;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, prelude::*};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use api::FeedbackClient;
use app::{App, KeyAction};
use events::{AppEvent, ChannelSink};
use streamer::Streamer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;
    let log_path = logging::init(&config.logging)?;
    info!(log = %log_path.display(), server = %config.server_url, "starting feedstream");

    let client = FeedbackClient::from_config(&config)?;
    if !client.health_check().await {
        warn!(server = %config.server_url, "server is not reachable yet");
    }
    let streamer = Streamer::new(client, &config);

    // Setup terminal; the guard restores it on every way out of main
    let guard = screen::enter().context("Failed to set up terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(streamer.endpoint_url());
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let res = run_app(&mut terminal, &mut app, &streamer, &tx, &mut rx);

    terminal.show_cursor()?;
    drop(guard);

    if let Err(err) = res {
        error!(error = ?err, "terminal loop failed");
        eprintln!("Error: {err:?}");
    }

    info!("feedstream exiting");
    Ok(())
}

/// Spawn one submission for the current input. Earlier submissions keep
/// running but their updates carry an old generation and are dropped.
fn spawn_submission(
    app: &mut App,
    streamer: &Streamer,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let Some((generation, feedback)) = app.begin_submission() else {
        return;
    };
    debug!(generation, "submitting feedback");

    let streamer = streamer.clone();
    let tx = event_tx.clone();

    tokio::spawn(async move {
        let mut sink = ChannelSink::new(generation, tx.clone());
        let outcome = streamer.submit(&feedback, &mut sink).await;
        debug!(generation, ?outcome, "submission ended");
        let _ = tx.send(AppEvent::Finished { generation });
    });
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    streamer: &Streamer,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw frame")?;

        // Apply everything the submission tasks produced since the last frame
        while let Ok(app_event) = event_rx.try_recv() {
            app.handle_event(app_event);
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && app.handle_key(key.code, key.modifiers) == KeyAction::Submit
                {
                    spawn_submission(app, streamer, event_tx);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppConfig;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn answer(server: &MockServer, feedback: &str, body: &str, delay_ms: u64) {
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({ "feedback": feedback })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    fn streamer_for(server: &MockServer) -> Streamer {
        let config = AppConfig {
            server_url: server.uri(),
            ..AppConfig::default()
        };
        Streamer::new(FeedbackClient::from_config(&config).unwrap(), &config)
    }

    /// Submit `first` then `second` back to back, feed every event into the
    /// app and record `is_streaming` right before each `Finished` is applied.
    async fn run_two_submissions(server: &MockServer) -> (App, Vec<(u64, bool)>) {
        let streamer = streamer_for(server);
        let mut app = App::new(streamer.endpoint_url());
        let (tx, mut rx) = mpsc::unbounded_channel();

        app.feedback = "first".to_string();
        spawn_submission(&mut app, &streamer, &tx);
        app.feedback = "second".to_string();
        spawn_submission(&mut app, &streamer, &tx);
        assert_eq!(app.generation, 2);

        let mut finished = Vec::new();
        while finished.len() < 2 {
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("submission did not finish in time")
                .expect("channel closed");
            if let AppEvent::Finished { generation } = event {
                finished.push((generation, app.is_streaming));
            }
            app.handle_event(event);
        }
        (app, finished)
    }

    #[tokio::test]
    async fn test_slow_superseded_submission_cannot_overwrite_newer_output() {
        let server = MockServer::start().await;
        answer(&server, "first", "stale answer", 400).await;
        answer(&server, "second", "fresh answer", 0).await;

        let (app, finished) = run_two_submissions(&server).await;

        assert_eq!(finished, vec![(2, true), (1, false)]);
        assert_eq!(app.story_output, "fresh answer");
        assert!(!app.is_streaming);
    }

    #[tokio::test]
    async fn test_older_submission_finishing_first_keeps_streaming_state() {
        let server = MockServer::start().await;
        answer(&server, "first", "stale answer", 0).await;
        answer(&server, "second", "fresh answer", 400).await;

        let (app, finished) = run_two_submissions(&server).await;

        // The older task ends first but the newest one is still running
        assert_eq!(finished, vec![(1, true), (2, true)]);
        assert_eq!(app.story_output, "fresh answer");
        assert!(!app.is_streaming);
    }

    #[tokio::test]
    async fn test_blank_input_spawns_nothing() {
        let server = MockServer::start().await;
        let streamer = streamer_for(&server);
        let mut app = App::new(streamer.endpoint_url());
        let (tx, mut rx) = mpsc::unbounded_channel();

        app.feedback = "   ".to_string();
        spawn_submission(&mut app, &streamer, &tx);

        assert_eq!(app.generation, 0);
        assert!(rx.try_recv().is_err());
    }
}
