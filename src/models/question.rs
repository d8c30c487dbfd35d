use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NUM_OPTIONS: usize = 4;

/// A single multiple-choice question as produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Requested difficulty, passed through to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, medium or hard)")),
        }
    }
}

/// Why a question list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("question list is empty")]
    Empty,

    #[error("question {index} has no text")]
    BlankQuestion { index: usize },

    #[error("question {index} has correct index {correct_index}, expected 0-3")]
    CorrectIndexOutOfRange { index: usize, correct_index: usize },
}

/// Checks the invariants the session relies on. The option count is already
/// enforced by the array type.
pub fn validate_questions(questions: &[QuizQuestion]) -> Result<(), ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        if question.question.trim().is_empty() {
            return Err(ValidationError::BlankQuestion { index });
        }
        if question.correct_index >= NUM_OPTIONS {
            return Err(ValidationError::CorrectIndexOutOfRange {
                index,
                correct_index: question.correct_index,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_index: usize) -> QuizQuestion {
        QuizQuestion {
            question: "Which planet is largest?".to_string(),
            options: [
                "Mars".to_string(),
                "Jupiter".to_string(),
                "Venus".to_string(),
                "Earth".to_string(),
            ],
            correct_index,
            explanation: "Jupiter is a gas giant.".to_string(),
        }
    }

    #[test]
    fn test_parse_camel_case_record() {
        let json = r#"{
            "question": "2 + 2?",
            "options": ["3", "4", "5", "22"],
            "correctIndex": 1,
            "explanation": "Basic arithmetic."
        }"#;
        let parsed: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.correct_index, 1);
        assert_eq!(parsed.options[1], "4");
        assert!(parsed.is_correct(1));
        assert!(!parsed.is_correct(0));
    }

    #[test]
    fn test_wrong_option_count_fails_to_parse() {
        let json = r#"{
            "question": "2 + 2?",
            "options": ["3", "4", "5"],
            "correctIndex": 1,
            "explanation": ""
        }"#;
        assert!(serde_json::from_str::<QuizQuestion>(json).is_err());
    }

    #[test]
    fn test_validate_questions() {
        assert!(validate_questions(&[question(0), question(3)]).is_ok());
        assert_eq!(validate_questions(&[]), Err(ValidationError::Empty));
        assert_eq!(
            validate_questions(&[question(1), question(4)]),
            Err(ValidationError::CorrectIndexOutOfRange {
                index: 1,
                correct_index: 4
            })
        );

        let mut blank = question(0);
        blank.question = "   ".to_string();
        assert_eq!(
            validate_questions(&[blank]),
            Err(ValidationError::BlankQuestion { index: 0 })
        );
    }

    #[test]
    fn test_difficulty_cycle_and_parse() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
    }
}
