//! Question-data providers and the quiz payload wire format.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use quiz_core::model::{Question, QuestionId, QuestionSet, QuestionSetError};

use crate::error::ProviderError;

/// Source of the question set for one attempt; called once per load.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` when the data cannot be fetched, decoded or validated.
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError>;
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    #[serde(default)]
    pub status: Option<String>,
    pub data: QuizData,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    #[serde(default)]
    pub test_id: Option<String>,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question_id: String,
    pub question: String,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub answer_type: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: Vec<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionSetError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let id = QuestionId::new(record.question_id);
        Question::new(id.clone(), record.question, record.options, record.correct_answer)
            .map_err(|source| QuestionSetError::InvalidQuestion { id, source })
    }
}

impl TryFrom<QuizPayload> for QuestionSet {
    type Error = QuestionSetError;

    fn try_from(payload: QuizPayload) -> Result<Self, Self::Error> {
        let questions = payload
            .data
            .questions
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        QuestionSet::new(questions)
    }
}

/// Decode and validate a quiz payload.
///
/// # Errors
///
/// Returns `ProviderError::Decode` for malformed JSON and `ProviderError::Invalid`
/// when the questions break the data contract.
pub fn parse_quiz(json: &str) -> Result<QuestionSet, ProviderError> {
    let payload: QuizPayload = serde_json::from_str(json)?;
    into_question_set(payload)
}

fn into_question_set(payload: QuizPayload) -> Result<QuestionSet, ProviderError> {
    tracing::debug!(
        test_id = payload.data.test_id.as_deref().unwrap_or("-"),
        status = payload.status.as_deref().unwrap_or("-"),
        questions = payload.data.questions.len(),
        "decoded quiz payload"
    );
    Ok(QuestionSet::try_from(payload)?)
}

//
// ─── PROVIDERS ─────────────────────────────────────────────────────────────────
//

/// Fetches the quiz payload over HTTP.
#[derive(Clone)]
pub struct HttpQuestionProvider {
    client: Client,
    url: String,
}

impl HttpQuestionProvider {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuestionProvider for HttpQuestionProvider {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }
        let payload: QuizPayload = response.json().await?;
        into_question_set(payload)
    }
}

#[derive(Clone, Debug)]
pub enum JsonSource {
    File(PathBuf),
    Inline(String),
}

/// Reads the quiz payload from a local file or an in-memory string.
#[derive(Clone, Debug)]
pub struct JsonQuestionProvider {
    source: JsonSource,
}

impl JsonQuestionProvider {
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: JsonSource::File(path.into()),
        }
    }

    #[must_use]
    pub fn inline(json: impl Into<String>) -> Self {
        Self {
            source: JsonSource::Inline(json.into()),
        }
    }
}

#[async_trait]
impl QuestionProvider for JsonQuestionProvider {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        match &self.source {
            JsonSource::File(path) => {
                let raw = tokio::fs::read_to_string(path).await?;
                parse_quiz(&raw)
            }
            JsonSource::Inline(raw) => parse_quiz(raw),
        }
    }
}

/// Pick a provider for a location: `http(s)://` URLs are fetched, anything else is a file path.
#[must_use]
pub fn provider_for(location: &str) -> Arc<dyn QuestionProvider> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpQuestionProvider::new(location))
    } else {
        Arc::new(JsonQuestionProvider::file(location))
    }
}
