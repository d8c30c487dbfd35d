use tracing::{debug, error, info};
use uuid::Uuid;

use crate::models::{AppState, Difficulty, QuizQuestion, NUM_OPTIONS};
use crate::provider::{ProviderError, QuestionProvider};
use crate::session::{Advance, QuizSession};

/// Shown on the setup screen whenever generation fails, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate quiz. Please check your connection and try again.";

const SUBJECT_MAX_LENGTH: usize = 80;

pub const SUGGESTIONS: [&str; 6] = [
    "Space Exploration",
    "History of Jazz",
    "React JS Patterns",
    "Marine Biology",
    "Cybersecurity Basics",
    "Ancient Rome",
];

/// An outstanding call to the question provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub id: Uuid,
    pub subject: String,
    pub difficulty: Difficulty,
}

/// Input state of the setup screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupForm {
    pub input: String,
    pub difficulty: Difficulty,
    suggestion: Option<usize>,
}

impl SetupForm {
    pub fn push(&mut self, c: char) {
        if self.input.chars().count() < SUBJECT_MAX_LENGTH {
            self.input.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn next_difficulty(&mut self) {
        self.difficulty = self.difficulty.next();
    }

    pub fn previous_difficulty(&mut self) {
        self.difficulty = self.difficulty.previous();
    }

    pub fn next_suggestion(&mut self) {
        let index = self.suggestion.map_or(0, |i| (i + 1) % SUGGESTIONS.len());
        self.apply_suggestion(index);
    }

    pub fn previous_suggestion(&mut self) {
        let index = self
            .suggestion
            .map_or(SUGGESTIONS.len() - 1, |i| (i + SUGGESTIONS.len() - 1) % SUGGESTIONS.len());
        self.apply_suggestion(index);
    }

    fn apply_suggestion(&mut self, index: usize) {
        self.suggestion = Some(index);
        self.input = SUGGESTIONS[index].to_string();
    }

    /// The subject to submit, if there is one.
    pub fn subject(&self) -> Option<&str> {
        let trimmed = self.input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Summary line for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    pub percentage: u32,
    pub title: &'static str,
    pub message: &'static str,
}

impl Rating {
    pub fn for_score(score: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            ((score as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        let (title, message) = match percentage {
            100.. => ("Quiz Master!", "Flawless victory. You're an expert."),
            80..=99 => ("Excellent!", "You have a strong grasp of this topic."),
            60..=79 => ("Good Effort!", "You're on the right track."),
            _ => ("Keep Learning!", "Every mistake is a lesson learned."),
        };

        Self {
            percentage,
            title,
            message,
        }
    }
}

/// Application flow: setup, loading, quiz, results.
pub struct App {
    pub state: AppState,
    pub form: SetupForm,
    subject: String,
    difficulty: Difficulty,
    error: Option<String>,
    score: usize,
    question_count: usize,
    session: Option<QuizSession>,
    pending: Option<Uuid>,
    cursor: usize,
    result_scroll: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::Setup,
            form: SetupForm::default(),
            subject: String::new(),
            difficulty: Difficulty::default(),
            error: None,
            score: 0,
            question_count: 0,
            session: None,
            pending: None,
            cursor: 0,
            result_scroll: 0,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        self.session.as_ref().map(QuizSession::questions).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.state == AppState::Loading
    }

    /// Option under the cursor on the quiz screen.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Submit the setup form. Does nothing for a blank subject.
    pub fn submit_setup(&mut self) -> Option<GenerationRequest> {
        let subject = self.form.subject()?.to_string();
        let difficulty = self.form.difficulty;
        self.start_quiz(&subject, difficulty)
    }

    /// Begin generating a quiz.
    ///
    /// `subject` must be non-empty after trimming; callers check this. While
    /// a generation is already running the call is ignored.
    pub fn start_quiz(
        &mut self,
        subject: &str,
        difficulty: Difficulty,
    ) -> Option<GenerationRequest> {
        if self.is_loading() {
            debug!(subject, "start ignored, generation already in flight");
            return None;
        }

        let id = Uuid::new_v4();
        self.subject = subject.to_string();
        self.difficulty = difficulty;
        self.error = None;
        self.pending = Some(id);
        self.state = AppState::Loading;
        info!(%id, subject, %difficulty, "generating quiz");

        Some(GenerationRequest {
            id,
            subject: subject.to_string(),
            difficulty,
        })
    }

    /// Apply the outcome of a generation request.
    ///
    /// Results for anything but the outstanding request are dropped.
    pub fn complete_generation(
        &mut self,
        id: Uuid,
        result: Result<Vec<QuizQuestion>, ProviderError>,
    ) {
        if !self.is_loading() || self.pending != Some(id) {
            debug!(%id, "discarding stale generation result");
            return;
        }
        self.pending = None;

        let session = result
            .and_then(|questions| QuizSession::new(questions).map_err(ProviderError::from));
        match session {
            Ok(session) => {
                info!(%id, count = session.total_questions(), "quiz ready");
                self.question_count = session.total_questions();
                self.session = Some(session);
                self.cursor = 0;
                self.state = AppState::Quiz;
            }
            Err(err) => {
                error!(%id, error = %err, "failed to generate quiz");
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.session = None;
                self.question_count = 0;
                self.state = AppState::Setup;
            }
        }
    }

    /// Run one generation to completion against `provider`.
    pub async fn generate(
        &mut self,
        provider: &dyn QuestionProvider,
        subject: &str,
        difficulty: Difficulty,
    ) {
        let Some(request) = self.start_quiz(subject, difficulty) else {
            return;
        };
        let result = provider.generate(&request.subject, request.difficulty).await;
        self.complete_generation(request.id, result);
    }

    pub fn select_next_option(&mut self) {
        self.cursor = (self.cursor + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.cursor = (self.cursor + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Lock in `index` for the current question.
    pub fn select_option(&mut self, index: usize) -> bool {
        if self.state != AppState::Quiz {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let applied = session.select_option(index);
        if applied {
            self.cursor = index;
        }
        applied
    }

    /// Move past a revealed question, finishing the quiz after the last one.
    pub fn advance(&mut self) {
        if self.state != AppState::Quiz {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.advance() {
            Some(Advance::Next(_)) => self.cursor = 0,
            Some(Advance::Finished { score }) => self.finish_quiz(score),
            None => {}
        }
    }

    /// Enter/Space on the quiz screen: select under the cursor, or advance.
    pub fn confirm(&mut self) {
        let revealed = self.session.as_ref().is_some_and(QuizSession::is_revealed);
        if revealed {
            self.advance();
        } else {
            self.select_option(self.cursor);
        }
    }

    pub fn finish_quiz(&mut self, final_score: usize) {
        info!(score = final_score, total = self.question_count, "quiz finished");
        self.score = final_score;
        self.result_scroll = 0;
        self.state = AppState::Results;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.question_count.saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        debug!("restarting");
        *self = Self::new();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
