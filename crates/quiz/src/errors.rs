//! Error taxonomy and retry-policy types for the generation pipeline.
//!
//! Every failure class the pipeline can produce is a distinct variant of a
//! distinct enum, tagged by the stage that produced it. Failures are values —
//! they are carried inside [`crate::types::GenerationOutcome`] and never
//! panic across the pipeline boundary.
//!
//! A model *refusal* is deliberately absent from this module: a well-formed
//! negative response is a successful classification, not a fault, and is
//! represented by [`crate::types::GenerationOutcome::Refused`].
//!
//! [`RetryPolicy`] is a cross-cutting concern: the caller owns any retry, and
//! decides by asking the error which policy applies. No stage retries
//! internally.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// ## Rules
///
/// - `Retryable`: transport failures (unreachable endpoint, non-2xx status) —
///   the model was never consulted or its answer never arrived intact.
/// - `NonRetryable`: everything else. A malformed envelope indicates provider
///   contract drift; a parse failure indicates the model ignored the
///   instruction text. Repeating the identical request is the caller's call
///   to make, not an automatic recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    ///
    /// `after` optionally specifies the minimum delay before retrying. `None`
    /// means retry immediately or apply the caller's own back-off schedule.
    Retryable {
        /// Minimum back-off before the next attempt.
        after: Option<Duration>,
    },
    /// The operation must not be automatically retried.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// The pipeline stage that produced a failure.
///
/// Carried on [`GenerationError`] for diagnostics; the stages are ordered and
/// the pipeline short-circuits, so at most one stage ever reports per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Request validation, before any prompt is built.
    Request,
    /// The HTTP call to the generation endpoint.
    Transport,
    /// Extraction of generated text from the provider envelope.
    Extraction,
    /// Parsing of sanitised model output into question records.
    Parse,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Request => "request",
            Stage::Transport => "transport",
            Stage::Extraction => "extraction",
            Stage::Parse => "parse",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Stage-level errors
// ---------------------------------------------------------------------------

/// A [`crate::types::GenerationRequest`] failed validation.
///
/// Produced by the validating constructor, before any network work.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum RequestError {
    /// The topic is empty after trimming.
    #[error("Topic must not be empty")]
    EmptyTopic,

    /// The topic exceeds the 250-character limit.
    #[error("Topic is {len} characters; the limit is 250")]
    TopicTooLong {
        /// Character count of the rejected topic.
        len: usize,
    },

    /// The question count is outside the supported 1–50 range.
    #[error("Question count {count} is outside the supported range 1-50")]
    InvalidCount {
        /// The rejected count.
        count: u32,
    },
}

/// The HTTP call to the generation endpoint failed.
///
/// Transport errors never carry the request URL: the API key travels as a
/// query parameter, so the URL is a secret.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum TransportError {
    /// The endpoint could not be reached (connection, DNS, or timeout failure).
    #[error("Generation endpoint unreachable: {message}")]
    Unreachable {
        /// Description of the underlying connection failure, with the URL stripped.
        message: String,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("Generation endpoint returned HTTP {status}")]
    ServerError {
        /// The HTTP status code received.
        status: u16,
    },
}

/// The provider's response envelope did not have the expected shape.
///
/// Indicates provider/API contract drift; not user-actionable. All knowledge
/// of the envelope shape lives in the provider adapter crate.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ExtractionError {
    /// An expected key was absent, had the wrong shape, or the extracted text
    /// was empty.
    #[error("Malformed provider envelope: {detail}")]
    MalformedEnvelope {
        /// Which part of the envelope failed to decode.
        detail: String,
    },
}

/// The model's output did not honour the structural contract stated in the
/// prompt.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ParseError {
    /// The sanitised text does not begin with `{`.
    #[error("Model output is not a JSON object")]
    NotJson,

    /// The text begins with `{` but is not parsable JSON.
    #[error("Model output is not valid JSON: {message}")]
    InvalidJson {
        /// The underlying JSON parse failure.
        message: String,
    },

    /// The model reported success but supplied no `questions` array.
    ///
    /// A successful-but-empty quiz is not a valid outcome.
    #[error("Model reported success but returned no questions array")]
    MissingQuestions,
}

/// Failure of the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("Store I/O failure: {message}")]
    Io {
        /// Description of the underlying I/O failure.
        message: String,
    },

    /// The backing file exists but does not decode as a store document.
    #[error("Store document is corrupt: {message}")]
    Corrupt {
        /// The underlying decode failure.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Pipeline-level error
// ---------------------------------------------------------------------------

/// Any failure the generation pipeline can produce, tagged by stage.
///
/// Exactly one stage reports per failed run; the pipeline short-circuits on
/// the first failure and never returns a partially-filled question list
/// alongside an error.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GenerationError {
    /// The request failed validation before any prompt was built.
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    /// The HTTP call failed.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The provider envelope could not be decoded.
    #[error("Extraction failure: {0}")]
    Extraction(#[from] ExtractionError),

    /// The model output could not be parsed into records.
    #[error("Parse failure: {0}")]
    Parse(#[from] ParseError),
}

impl GenerationError {
    /// Returns the pipeline stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            GenerationError::Request(_) => Stage::Request,
            GenerationError::Transport(_) => Stage::Transport,
            GenerationError::Extraction(_) => Stage::Extraction,
            GenerationError::Parse(_) => Stage::Parse,
        }
    }

    /// Returns the retry policy for this error.
    ///
    /// Only transport failures are retryable; see [`RetryPolicy`] for the rules.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            GenerationError::Transport(_) => RetryPolicy::Retryable { after: None },
            _ => RetryPolicy::NonRetryable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_tagging_matches_variant() {
        let err = GenerationError::from(TransportError::ServerError { status: 500 });
        assert_eq!(err.stage(), Stage::Transport);

        let err = GenerationError::from(ParseError::NotJson);
        assert_eq!(err.stage(), Stage::Parse);

        let err = GenerationError::from(ExtractionError::MalformedEnvelope {
            detail: "missing candidates".into(),
        });
        assert_eq!(err.stage(), Stage::Extraction);

        let err = GenerationError::from(RequestError::EmptyTopic);
        assert_eq!(err.stage(), Stage::Request);
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        let transport = GenerationError::from(TransportError::Unreachable {
            message: "connection refused".into(),
        });
        assert_eq!(
            transport.retry_policy(),
            RetryPolicy::Retryable { after: None }
        );

        let parse = GenerationError::from(ParseError::MissingQuestions);
        assert_eq!(parse.retry_policy(), RetryPolicy::NonRetryable);
    }

    #[test]
    fn display_messages_name_the_failure() {
        let err = GenerationError::from(TransportError::ServerError { status: 503 });
        assert_eq!(
            err.to_string(),
            "Transport failure: Generation endpoint returned HTTP 503"
        );
    }
}
