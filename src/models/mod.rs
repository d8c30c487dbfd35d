mod question;
mod state;

pub use question::{validate_questions, Difficulty, QuizQuestion, ValidationError, NUM_OPTIONS};
pub use state::AppState;
