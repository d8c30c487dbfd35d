//! Google Gemini question provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::models::{Difficulty, QuizQuestion};

use super::{ProviderError, QuestionProvider};

pub const QUESTIONS_PER_QUIZ: usize = 5;

/// Gemini `generateContent` client with a JSON response schema.
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn build_prompt(subject: &str, difficulty: Difficulty) -> String {
    format!(
        "Generate a challenging and engaging multiple-choice quiz about \"{subject}\".\n\
         The difficulty level is {difficulty}.\n\
         Create exactly {QUESTIONS_PER_QUIZ} questions.\n\
         For each question, provide 4 options, the index of the correct option (0-3), \
         and a brief interesting explanation of why that answer is correct.\n\
         Ensure the tone is fun and educational."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {
                    "type": "STRING",
                    "description": "The text of the question"
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "A list of 4 possible answers"
                },
                "correctIndex": {
                    "type": "INTEGER",
                    "description": "The zero-based index of the correct answer (0-3)"
                },
                "explanation": {
                    "type": "STRING",
                    "description": "A short explanation of the correct answer"
                }
            },
            "required": ["question", "options", "correctIndex", "explanation"]
        }
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiResponse {
    /// All text parts of the first candidate, concatenated.
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Parse the generated JSON text into exactly `QUESTIONS_PER_QUIZ` questions.
fn parse_questions(text: &str) -> Result<Vec<QuizQuestion>, ProviderError> {
    let questions: Vec<QuizQuestion> = serde_json::from_str(text.trim())
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    if questions.len() != QUESTIONS_PER_QUIZ {
        return Err(ProviderError::MalformedResponse(format!(
            "expected {} questions, got {}",
            QUESTIONS_PER_QUIZ,
            questions.len()
        )));
    }

    Ok(questions)
}

#[async_trait]
impl QuestionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self), fields(model = %self.model))]
    async fn generate(
        &self,
        subject: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<QuizQuestion>, ProviderError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some(build_prompt(subject, difficulty)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(ProviderError::RateLimited);
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Api { status, message });
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| {
                ProviderError::MalformedResponse(format!("failed to parse response: {e}"))
            })?;

        let Some(text) = api_response.text() else {
            warn!("gemini returned no text");
            return Err(ProviderError::EmptyResponse);
        };

        let questions = parse_questions(&text)?;
        debug!(count = questions.len(), "questions generated");
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn questions_json(count: usize) -> String {
        let items: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "question": format!("Question {i}"),
                    "options": ["a", "b", "c", "d"],
                    "correctIndex": i % 4,
                    "explanation": "Because."
                })
            })
            .collect();
        Value::Array(items).to_string()
    }

    fn candidate_body(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] }
            }]
        })
    }

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new("test-key", "gemini-2.5-flash", &server.uri(), 5).unwrap()
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(candidate_body(&questions_json(5))),
            )
            .mount(&server)
            .await;

        let questions = provider(&server)
            .generate("Space Exploration", Difficulty::Hard)
            .await
            .unwrap();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[2].correct_index, 2);
        assert_eq!(questions[0].options[3], "d");
    }

    #[tokio::test]
    async fn test_authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .generate("Jazz", Difficulty::Easy)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn test_rate_limiting() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = provider(&server)
            .generate("Jazz", Difficulty::Easy)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[tokio::test]
    async fn test_api_error_message_extracted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": { "code": 500, "message": "internal failure" }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .generate("Jazz", Difficulty::Easy)
            .await
            .unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal failure");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .generate("Jazz", Difficulty::Easy)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_wrong_question_count_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(candidate_body(&questions_json(3))),
            )
            .mount(&server)
            .await;

        let err = provider(&server)
            .generate("Jazz", Difficulty::Easy)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_text_split_across_parts() {
        let server = MockServer::start().await;
        let text = questions_json(5);
        let (head, tail) = text.split_at(text.len() / 2);

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": head }, { "text": tail }] }
                }]
            })))
            .mount(&server)
            .await;

        let questions = provider(&server)
            .generate("Jazz", Difficulty::Easy)
            .await
            .unwrap();
        assert_eq!(questions.len(), 5);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_body(&questions_json(5)))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let provider =
            GeminiProvider::new("test-key", "gemini-2.5-flash", &server.uri(), 1).unwrap();
        let err = provider.generate("Jazz", Difficulty::Easy).await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(1)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            GeminiProvider::new("test-key", "gemini-2.5-flash", &format!("http://{addr}"), 5)
                .unwrap();
        let err = provider.generate("Jazz", Difficulty::Easy).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[test]
    fn test_unparseable_text_rejected() {
        assert!(matches!(
            parse_questions("Sure! Here is your quiz:"),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_prompt_mentions_subject_and_difficulty() {
        let prompt = build_prompt("Ancient Rome", Difficulty::Hard);
        assert!(prompt.contains("\"Ancient Rome\""));
        assert!(prompt.contains("Hard"));
        assert!(prompt.contains("exactly 5 questions"));
    }
}
