//! Questions served from a local JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::models::{validate_questions, Difficulty, QuizQuestion};

use super::{ProviderError, QuestionProvider};

/// Load and validate a question list from a JSON file.
///
/// The file holds an array in the same format the AI service returns.
pub fn load_questions_from_json<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<QuizQuestion>, ProviderError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| ProviderError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let questions: Vec<QuizQuestion> = serde_json::from_str(&json_content).map_err(|err| {
        ProviderError::MalformedResponse(format!("{}: {}", path.display(), err))
    })?;

    validate_questions(&questions)?;
    Ok(questions)
}

/// Offline provider. Ignores the subject and difficulty.
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl QuestionProvider for FileProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn generate(
        &self,
        subject: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ProviderError> {
        debug!(path = %self.path.display(), subject, %difficulty, "loading questions");
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_questions_from_json(path))
            .await
            .map_err(|err| ProviderError::Network(format!("loader task failed: {err}")))?
    }
}
