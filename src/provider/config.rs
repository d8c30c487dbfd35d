//! Provider configuration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::file::FileProvider;
use super::gemini::GeminiProvider;
use super::{QuestionProvider, UnconfiguredProvider};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for the question backend, resolved once at startup.
///
/// `Debug` masks the API key.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Serve questions from this JSON file instead of the AI service.
    pub questions_file: Option<PathBuf>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("questions_file", &self.questions_file)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            questions_file: None,
        }
    }
}

/// Build the provider described by `config`.
///
/// A missing or blank key is checked here, once. The returned provider then
/// fails every call with [`super::ProviderError::MissingApiKey`].
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn QuestionProvider> {
    if let Some(path) = &config.questions_file {
        info!(path = %path.display(), "serving questions from file");
        return Arc::new(FileProvider::new(path.clone()));
    }

    match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            match GeminiProvider::new(key, &config.model, &config.base_url, config.timeout_secs) {
                Ok(provider) => {
                    info!(model = %config.model, "using gemini provider");
                    Arc::new(provider)
                }
                Err(err) => {
                    warn!(error = %err, "failed to build gemini client");
                    Arc::new(UnconfiguredProvider)
                }
            }
        }
        _ => {
            warn!("API key is missing, quiz generation will fail");
            Arc::new(UnconfiguredProvider)
        }
    }
}
