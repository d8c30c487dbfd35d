//! # quizgen
//!
//! A terminal quiz on any subject. Questions come from a
//! [`QuestionProvider`], usually the Gemini backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizgen::{create_provider, ProviderConfig, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = ProviderConfig {
//!         api_key: std::env::var("API_KEY").ok(),
//!         ..ProviderConfig::default()
//!     };
//!
//!     Quiz::new(create_provider(&config)).run().await
//! }
//! ```

mod app;
mod models;
pub mod provider;
mod session;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

pub use app::{
    App, GenerationRequest, Rating, SetupForm, GENERATION_FAILED_MESSAGE, SUGGESTIONS,
};
pub use models::{
    validate_questions, AppState, Difficulty, QuizQuestion, ValidationError, NUM_OPTIONS,
};
pub use provider::{
    create_provider, load_questions_from_json, ProviderConfig, ProviderError, QuestionProvider,
};
pub use session::{Advance, Phase, QuizSession};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Terminal IO failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Loading questions failed outside the interactive flow.
    #[error("failed to load questions: {0}")]
    Provider(#[from] ProviderError),
}

type GenerationResult = (Uuid, Result<Vec<QuizQuestion>, ProviderError>);

/// A quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
    provider: Arc<dyn QuestionProvider>,
}

impl Quiz {
    pub fn new(provider: Arc<dyn QuestionProvider>) -> Self {
        Self {
            app: App::new(),
            provider,
        }
    }

    /// Pre-fill the setup form.
    pub fn with_subject(mut self, subject: &str, difficulty: Difficulty) -> Self {
        for c in subject.chars() {
            self.app.form.push(c);
        }
        self.app.form.difficulty = difficulty;
        self
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal and returns when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        info!(provider = self.provider.name(), "starting quiz");
        let mut term = terminal::init()?;
        let result = self.run_event_loop(&mut term).await;
        terminal::restore()?;
        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut terminal::AppTerminal,
    ) -> Result<(), QuizError> {
        let mut generations = Generations::new(Arc::clone(&self.provider));

        loop {
            generations.drain(&mut self.app);

            terminal.draw(|frame| ui::render(frame, &self.app))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match handle_input(&mut self.app, key) {
                    Action::Quit => break,
                    Action::Generate(request) => generations.spawn(request),
                    Action::None => {}
                }
            }
        }

        Ok(())
    }
}

/// Runs provider calls off the event loop and hands the results back.
struct Generations {
    provider: Arc<dyn QuestionProvider>,
    tx: mpsc::UnboundedSender<GenerationResult>,
    rx: mpsc::UnboundedReceiver<GenerationResult>,
}

impl Generations {
    fn new(provider: Arc<dyn QuestionProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { provider, tx, rx }
    }

    fn spawn(&self, request: GenerationRequest) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.generate(&request.subject, request.difficulty).await;
            if tx.send((request.id, result)).is_err() {
                debug!(id = %request.id, "event loop gone, dropping generation result");
            }
        });
    }

    /// Apply every result that has already arrived.
    fn drain(&mut self, app: &mut App) {
        while let Ok((id, result)) = self.rx.try_recv() {
            app.complete_generation(id, result);
        }
    }

    /// Wait for the next result and apply it.
    #[cfg(test)]
    async fn apply_next(&mut self, app: &mut App) {
        if let Some((id, result)) = self.rx.recv().await {
            app.complete_generation(id, result);
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    Generate(GenerationRequest),
}

fn handle_input(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match app.state {
        AppState::Setup => handle_setup_input(app, key.code),
        AppState::Loading => handle_loading_input(key.code),
        AppState::Quiz => handle_quiz_input(app, key.code),
        AppState::Results => handle_result_input(app, key.code),
    }
}

fn handle_setup_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Enter => match app.submit_setup() {
            Some(request) => Action::Generate(request),
            None => Action::None,
        },
        KeyCode::Char(c) => {
            app.form.push(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.form.pop();
            Action::None
        }
        KeyCode::Tab | KeyCode::Right => {
            app.form.next_difficulty();
            Action::None
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.form.previous_difficulty();
            Action::None
        }
        KeyCode::Down => {
            app.form.next_suggestion();
            Action::None
        }
        KeyCode::Up => {
            app.form.previous_suggestion();
            Action::None
        }
        KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

fn handle_loading_input(key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Char(c @ '1'..='4') => {
            app.select_option(c as usize - '1' as usize);
        }
        KeyCode::Char(c @ 'a'..='d') => {
            app.select_option(c as usize - 'a' as usize);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::None
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::None
}
