//! Question providers.
//!
//! A provider turns a subject and difficulty into an ordered list of
//! questions, or fails. The controller treats every failure the same way.

mod config;
mod error;
mod file;
mod gemini;
mod mock;

use async_trait::async_trait;

use crate::models::{Difficulty, QuizQuestion};

pub use config::{
    create_provider, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
pub use error::ProviderError;
pub use file::{load_questions_from_json, FileProvider};
pub use gemini::{GeminiProvider, QUESTIONS_PER_QUIZ};
pub use mock::MockProvider;

/// Source of quiz questions.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Short name for logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Produce questions about `subject`.
    async fn generate(
        &self,
        subject: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ProviderError>;
}

/// Stands in when no credential is configured.
#[derive(Debug, Default)]
pub struct UnconfiguredProvider;

#[async_trait]
impl QuestionProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn generate(
        &self,
        _subject: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ProviderError> {
        Err(ProviderError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_always_fails() {
        let provider = UnconfiguredProvider;
        for _ in 0..2 {
            let err = provider.generate("Rust", Difficulty::Easy).await.unwrap_err();
            assert!(matches!(err, ProviderError::MissingApiKey));
        }
    }
}
