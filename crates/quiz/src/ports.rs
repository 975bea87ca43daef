//! Port traits implemented by infrastructure crates.
//!
//! The domain sees a text generator that answers a prompt with the model's
//! generated text, and a store that persists accepted records. Transport,
//! provider envelopes, and storage formats all live behind these seams.

use async_trait::async_trait;

use crate::errors::{GenerationError, StoreError};
use crate::identifiers::{QuestionId, QuizId};
use crate::types::{QuestionRecord, Quiz};

// ---------------------------------------------------------------------------
// Generation port
// ---------------------------------------------------------------------------

/// Answers one prompt with the model's generated text.
///
/// Implementations own the transport and the provider envelope: the text
/// returned here is the model's output with the envelope already stripped.
/// One call, one request — retry policy belongs to the caller. The call is
/// the pipeline's only suspension point and must be cancel-safe: dropping the
/// future abandons the request without leaving partial state.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` as the sole message content and returns the generated
    /// text, or a transport/extraction error.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

// ---------------------------------------------------------------------------
// Persistence port
// ---------------------------------------------------------------------------

/// Durable storage for accepted quizzes and question records.
///
/// The persistence collaborator publishes a read model: list operations
/// return owned snapshots sorted newest-first. The pipeline never calls this
/// trait — only the composition root does, after a successful outcome.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Persists one quiz aggregate.
    async fn save_quiz(&self, quiz: Quiz) -> Result<(), StoreError>;

    /// Returns all saved quizzes, newest first.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StoreError>;

    /// Persists one standalone question record.
    async fn save_question(&self, question: QuestionRecord) -> Result<(), StoreError>;

    /// Returns all saved standalone questions, newest first.
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StoreError>;

    /// Deletes one quiz by id; returns `true` if it existed.
    async fn delete_quiz(&self, id: QuizId) -> Result<bool, StoreError>;

    /// Deletes one question by id; returns `true` if it existed.
    async fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError>;

    /// Deletes every saved quiz and question.
    async fn delete_all(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

/// A [`TextGenerator`] that replays queued canned results, for tests.
///
/// Each call pops the next queued result; an exhausted queue reports an
/// unreachable endpoint.
#[derive(Default)]
pub struct MockTextGenerator {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, GenerationError>>>,
}

impl MockTextGenerator {
    /// Queues the model text the next call will return.
    pub fn push_text(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queues the error the next call will return.
    pub fn push_error(&self, error: impl Into<GenerationError>) {
        self.responses.lock().unwrap().push_back(Err(error.into()));
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(crate::errors::TransportError::Unreachable {
                message: "mock generator exhausted".to_owned(),
            }
            .into())
        })
    }
}
