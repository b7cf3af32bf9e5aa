use crossterm::event::{KeyCode, KeyModifiers};

use crate::events::{AppEvent, OutputUpdate};
use crate::streamer;

/// Which control has keyboard focus: the `feedback` input field or the
/// `get-feedback` button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Feedback,
    GetFeedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Submit,
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub exit_pending: bool,
    pub show_help: bool,
    pub focus: Focus,
    /// Contents of the `feedback` input field
    pub feedback: String,
    /// Contents of the `story-output` pane
    pub story_output: String,
    pub scroll_offset: usize,
    /// Generation of the newest submission; older ones are ignored
    pub generation: u64,
    pub is_streaming: bool,
    pub endpoint_url: String,
}

impl App {
    pub const fn new(endpoint_url: String) -> Self {
        Self {
            should_quit: false,
            exit_pending: false,
            show_help: false,
            focus: Focus::Feedback,
            feedback: String::new(),
            story_output: String::new(),
            scroll_offset: 0,
            generation: 0,
            is_streaming: false,
            endpoint_url,
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Feedback => Focus::GetFeedback,
            Focus::GetFeedback => Focus::Feedback,
        };
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub const fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        // The renderer clamps this to the real maximum
        self.scroll_offset = usize::MAX;
    }

    /// Map a key press to state changes. Enter in the input field and
    /// Enter/Space on the button both ask for a submission.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key == KeyCode::Char('c') {
            if self.exit_pending {
                self.quit();
            } else {
                self.exit_pending = true;
            }
            return KeyAction::None;
        }

        if self.exit_pending {
            // Any other key cancels the pending exit; Esc does nothing else
            self.exit_pending = false;
            if key == KeyCode::Esc {
                return KeyAction::None;
            }
        }

        if self.show_help {
            if key == KeyCode::Esc || (ctrl && key == KeyCode::Char('h')) {
                self.show_help = false;
            }
            return KeyAction::None;
        }

        match key {
            KeyCode::Char('q') if ctrl => self.quit(),
            KeyCode::Char('h') if ctrl => self.toggle_help(),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),

            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),

            KeyCode::Enter => return KeyAction::Submit,
            KeyCode::Char(' ') if self.focus == Focus::GetFeedback => return KeyAction::Submit,

            KeyCode::Backspace if self.focus == Focus::Feedback => {
                self.feedback.pop();
            }
            KeyCode::Char(c) if self.focus == Focus::Feedback && !ctrl => {
                self.feedback.push(c);
            }
            _ => {}
        }
        KeyAction::None
    }

    /// Start a new generation for the current input. Returns `None` when the
    /// input is blank, leaving everything untouched.
    pub fn begin_submission(&mut self) -> Option<(u64, String)> {
        if streamer::is_blank(&self.feedback) {
            return None;
        }
        self.generation += 1;
        self.is_streaming = true;
        Some((self.generation, self.feedback.clone()))
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Output { generation, update } => {
                if generation != self.generation {
                    return;
                }
                match update {
                    OutputUpdate::Replace(text) => {
                        self.story_output = text;
                        self.scroll_to_top();
                    }
                    OutputUpdate::Append(text) => {
                        self.story_output.push_str(&text);
                        self.scroll_to_bottom();
                    }
                }
            }
            AppEvent::Finished { generation } => {
                if generation == self.generation {
                    self.is_streaming = false;
                }
            }
        }
    }
}
