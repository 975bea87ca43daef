//! Shared value types for the quiz-generation domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (topics are 1–250 characters, counts are
//! in `[1, 50]`) and participate in domain computations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{GenerationError, RequestError};
use crate::identifiers::{QuestionId, QuizId};

// ---------------------------------------------------------------------------
// Request vocabulary
// ---------------------------------------------------------------------------

/// Difficulty requested for the generated questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Returns the spelling used inside the prompt text.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// Shape of the questions to generate.
///
/// The variant fixes the option count the model is instructed to produce:
/// four labeled options for multiple-choice, exactly `A) True` / `B) False`
/// for true-false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

impl QuestionType {
    /// Returns the spelling used inside the prompt text.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True/False",
        }
    }

    /// Number of options the model is instructed to emit per question.
    pub fn expected_option_count(self) -> usize {
        match self {
            QuestionType::MultipleChoice => 4,
            QuestionType::TrueFalse => 2,
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

/// Maximum topic length in characters, after trimming.
pub const MAX_TOPIC_CHARS: usize = 250;

/// Maximum number of questions per request.
pub const MAX_QUESTION_COUNT: u32 = 50;

/// An immutable, validated request for one generation run.
///
/// Construction validates all bounds; a value of this type is always safe to
/// turn into a prompt. The topic is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    topic: String,
    difficulty: Difficulty,
    question_type: QuestionType,
    language: String,
    count: u32,
}

impl GenerationRequest {
    /// Creates a validated request.
    ///
    /// The topic must be 1–250 characters after trimming and the count must
    /// be in `[1, 50]`. `language` is a human-readable language name (e.g.
    /// `"English"`, `"Turkish"`) passed verbatim into the prompt.
    pub fn new(
        topic: impl Into<String>,
        difficulty: Difficulty,
        question_type: QuestionType,
        language: impl Into<String>,
        count: u32,
    ) -> Result<Self, RequestError> {
        let topic = topic.into().trim().to_owned();
        if topic.is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        let len = topic.chars().count();
        if len > MAX_TOPIC_CHARS {
            return Err(RequestError::TopicTooLong { len });
        }
        if count == 0 || count > MAX_QUESTION_COUNT {
            return Err(RequestError::InvalidCount { count });
        }
        Ok(Self {
            topic,
            difficulty,
            question_type,
            language: language.into(),
            count,
        })
    }

    /// The quiz topic, trimmed.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Requested difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Requested question shape.
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// Human-readable name of the language all generated text must be in.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Exact number of questions requested.
    pub fn count(&self) -> u32 {
        self.count
    }
}

// ---------------------------------------------------------------------------
// Question records
// ---------------------------------------------------------------------------

/// One generated question, produced only by successful parsing of one
/// model-provided item. Immutable thereafter.
///
/// `id` and `created_at` are assigned at parse time; the model never supplies
/// them. Options are pre-labeled strings (e.g. `"A) ..."`) in the order the
/// model returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Unique identifier, minted at parse time.
    pub id: QuestionId,

    /// The question text shown to the user.
    pub prompt_text: String,

    /// Ordered, pre-labeled answer options.
    pub options: Vec<String>,

    /// The option string the model declared correct.
    ///
    /// The parser does not enforce membership in `options`; consumers check
    /// [`QuestionRecord::has_valid_answer`] and treat a non-member as "no
    /// option marked correct".
    pub correct_option: String,

    /// Creation timestamp, assigned at parse time.
    pub created_at: Timestamp,
}

impl QuestionRecord {
    /// Returns `true` if `correct_option` exactly equals one of `options`.
    pub fn has_valid_answer(&self) -> bool {
        self.options.iter().any(|o| o == &self.correct_option)
    }
}

// ---------------------------------------------------------------------------

/// A saved quiz: one topic plus the question records accepted from a single
/// generation run.
///
/// This is the aggregate the persistence collaborator stores; the pipeline
/// itself only ever produces the records inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier, minted when the quiz is assembled for storage.
    pub id: QuizId,

    /// The topic the questions were generated for.
    pub topic: String,

    /// Accepted question records, in model order.
    pub questions: Vec<QuestionRecord>,

    /// Creation timestamp.
    pub created_at: Timestamp,
}

impl Quiz {
    /// Assembles a quiz from accepted records, minting a fresh identifier.
    pub fn new(topic: impl Into<String>, questions: Vec<QuestionRecord>) -> Self {
        Self {
            id: QuizId::new_random(),
            topic: topic.into(),
            questions,
            created_at: Timestamp::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The single result of one pipeline invocation.
///
/// Exactly one of: an ordered list of records, a deliberate model refusal, or
/// a typed failure. A refusal is a successful classification — the caller
/// shows the model's reason to the user, not a generic error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GenerationOutcome {
    /// The model honoured the contract; records are in model order.
    Success(Vec<QuestionRecord>),

    /// The model explicitly declined (inappropriate, irrelevant, or unsafe
    /// topic).
    Refused {
        /// The model's stated reason, or `"unknown"` if it supplied none.
        reason: String,
    },

    /// A pipeline stage failed; see [`GenerationError::stage`].
    Failed(GenerationError),
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
