use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::application::coordinator::{KeyDisposition, SearchCoordinator};
use crate::domain::search::SearchState;
use crate::presentation::tui::ui;

/// Text field contents and cursor, counted in characters.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor_pos: usize,
}

impl InputState {
    fn byte_offset(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor_pos)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_offset()]
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_offset();
        self.text.insert(at, c);
        self.cursor_pos += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        self.cursor_pos -= 1;
        let at = self.byte_offset();
        self.text.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.text.chars().count() {
            return false;
        }
        let at = self.byte_offset();
        self.text.remove(at);
        true
    }

    fn replace(&mut self, text: String) {
        self.cursor_pos = text.chars().count();
        self.text = text;
    }
}

enum Step {
    Input(Option<std::io::Result<Event>>),
    Refresh(bool),
}

pub struct App {
    pub input: InputState,
    pub status_message: String,
    pub should_quit: bool,
    search: SearchCoordinator,
    state: watch::Receiver<SearchState>,
    image_dir: PathBuf,
}

impl App {
    pub fn new(search: SearchCoordinator, initial_query: Option<String>) -> Self {
        let state = search.subscribe();
        let mut app = Self {
            input: InputState::default(),
            status_message: String::new(),
            should_quit: false,
            search,
            state,
            image_dir: std::env::temp_dir(),
        };

        if let Some(query) = initial_query {
            app.input.replace(query);
            app.search.set_query(app.input.text.clone());
        }

        app
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();

        loop {
            let state = self.state();
            terminal.draw(|frame| ui::draw(frame, self, &state))?;

            let step = tokio::select! {
                event = events.next() => Step::Input(event),
                changed = self.state.changed() => Step::Refresh(changed.is_ok()),
            };

            match step {
                Step::Input(Some(Ok(Event::Key(key)))) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key);
                }
                Step::Input(Some(Ok(_))) | Step::Refresh(true) => {}
                Step::Input(Some(Err(err))) => return Err(err.into()),
                Step::Input(None) | Step::Refresh(false) => self.should_quit = true,
            }

            if self.should_quit {
                self.search.shutdown();
                return Ok(());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('o') if ctrl => self.open_image(),
            KeyCode::Esc => {
                if self.input.text.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.replace(String::new());
                    self.query_changed();
                }
            }
            KeyCode::Tab => {
                if self.search.accept_suggestion() == KeyDisposition::Handled {
                    self.input.replace(self.state.borrow().query.clone());
                }
            }
            // Submitting is disabled while a search is in flight.
            KeyCode::Enter => {
                if !self.state.borrow().loading {
                    self.search.submit(&self.input.text);
                }
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.query_changed();
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.query_changed();
                }
            }
            KeyCode::Left => self.input.cursor_pos = self.input.cursor_pos.saturating_sub(1),
            KeyCode::Right => {
                self.input.cursor_pos = (self.input.cursor_pos + 1).min(self.input.text.chars().count());
            }
            KeyCode::Home => self.input.cursor_pos = 0,
            KeyCode::End => self.input.cursor_pos = self.input.text.chars().count(),
            KeyCode::Char(c) if !ctrl => {
                self.input.insert(c);
                self.query_changed();
            }
            _ => {}
        }
    }

    fn query_changed(&mut self) {
        self.status_message.clear();
        self.search.set_query(self.input.text.clone());
    }

    fn open_image(&mut self) {
        let result = self.state.borrow().result.clone();
        let Some(image) = result else {
            self.status_message = "Nothing to open yet".to_string();
            return;
        };

        let path = match image.persist(&self.image_dir) {
            Ok(path) => path,
            Err(err) => {
                warn!(error = %err, "failed to save image");
                self.status_message = format!("Could not save image: {err}");
                return;
            }
        };

        match open::that(&path) {
            Ok(()) => {
                info!(path = %path.display(), "opened image");
                self.status_message = format!("Opened {}", path.display());
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "failed to open image");
                self.status_message = format!("Saved to {} (could not open: {err})", path.display());
            }
        }
    }
}
