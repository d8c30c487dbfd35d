//! Mock provider for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{Difficulty, QuizQuestion};

use super::{ProviderError, QuestionProvider};

type MockResponse = Result<Vec<QuizQuestion>, String>;

/// Replays scripted responses in order, then repeats the last one.
///
/// Failures are scripted as strings and surface as
/// [`ProviderError::Network`].
pub struct MockProvider {
    responses: Mutex<VecDeque<MockResponse>>,
    call_count: AtomicU32,
    last_request: Mutex<Option<(String, Difficulty)>>,
}

impl MockProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that always returns `questions`.
    pub fn with_questions(questions: Vec<QuizQuestion>) -> Self {
        Self::new(vec![Ok(questions)])
    }

    /// A mock that always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<(String, Difficulty)> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }

    fn next_response(&self) -> MockResponse {
        let Ok(mut responses) = self.responses.lock() else {
            return Err("mock state poisoned".to_string());
        };
        if responses.len() > 1 {
            responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        } else {
            responses.front().cloned().unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}

#[async_trait]
impl QuestionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        subject: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((subject.to_string(), difficulty));
        }

        self.next_response().map_err(ProviderError::Network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_sequence() {
        let provider = MockProvider::new(vec![Err("offline".to_string()), Ok(Vec::new())]);

        let first = provider.generate("Jazz", Difficulty::Easy).await;
        assert!(matches!(first, Err(ProviderError::Network(_))));

        let second = provider.generate("Rome", Difficulty::Hard).await.unwrap();
        assert!(second.is_empty());
        let third = provider.generate("Rome", Difficulty::Hard).await.unwrap();
        assert!(third.is_empty());

        assert_eq!(provider.call_count(), 3);
        assert_eq!(
            provider.last_request(),
            Some(("Rome".to_string(), Difficulty::Hard))
        );
    }
}
