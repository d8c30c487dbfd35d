//! Quiz session state machine.
//!
//! A session walks through a fixed list of questions. Each question is first
//! `Answering`; selecting an option locks it in and moves to `Revealed`.
//! Advancing from the last revealed question finishes the session and yields
//! the final score.

use tracing::debug;

use crate::models::{validate_questions, QuizQuestion, ValidationError, NUM_OPTIONS};

/// Where the current question stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No option chosen yet.
    Answering,
    /// An option is locked in and the explanation is visible.
    Revealed { selected: usize },
    /// The last question was advanced past. Nothing else happens.
    Finished,
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Next(usize),
    /// The session is over.
    Finished { score: usize },
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    selected_option: Option<usize>,
    answers: Vec<Option<usize>>,
    score: usize,
    finished: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, ValidationError> {
        validate_questions(&questions)?;
        let num_questions = questions.len();

        Ok(Self {
            questions,
            current_index: 0,
            selected_option: None,
            answers: vec![None; num_questions],
            score: 0,
            finished: false,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if let Some(selected) = self.selected_option {
            Phase::Revealed { selected }
        } else {
            Phase::Answering
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.phase(), Phase::Revealed { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    /// 1-based position and total, for "question N of M".
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.questions.len())
    }

    pub fn progress_label(&self) -> String {
        let (current, total) = self.progress();
        format!("{} / {}", current, total)
    }

    /// Locks in an answer for the current question.
    ///
    /// Returns `false` and changes nothing if the question is already
    /// revealed, the session is finished, or `index` is not an option.
    pub fn select_option(&mut self, index: usize) -> bool {
        if self.phase() != Phase::Answering {
            debug!(index, "selection ignored, answer already locked");
            return false;
        }
        if index >= NUM_OPTIONS {
            debug!(index, "selection ignored, no such option");
            return false;
        }

        self.selected_option = Some(index);
        self.answers[self.current_index] = Some(index);
        if self.current_question().is_correct(index) {
            self.score += 1;
        }

        debug!(
            question = self.current_index,
            index,
            score = self.score,
            "answer revealed"
        );
        true
    }

    /// Moves past a revealed question. Returns `None` when there is nothing
    /// to advance from.
    pub fn advance(&mut self) -> Option<Advance> {
        if !self.is_revealed() {
            return None;
        }

        if self.is_last_question() {
            self.finished = true;
            return Some(Advance::Finished { score: self.score });
        }

        self.current_index += 1;
        self.selected_option = None;
        Some(Advance::Next(self.current_index))
    }
}
