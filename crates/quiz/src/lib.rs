//! Core quiz-generation domain.
//!
//! This crate contains every domain concept, newtype identifier, shared value
//! type, and cross-cutting error type used throughout the generation pipeline,
//! together with the pure pipeline stages (prompt construction, sanitisation,
//! parsing). Infrastructure crates implement the port traits defined here;
//! they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype domain identifiers (`QuestionId`, `QuizId`) |
//! | [`types`] | Request and record types (`GenerationRequest`, `QuestionRecord`, etc.) |
//! | [`errors`] | Error taxonomy and retry-policy types |
//! | [`prompt`] | Deterministic prompt construction |
//! | [`sanitize`] | Removal of formatting artifacts from model output |
//! | [`parse`] | Strict parsing of sanitised model output into records |
//! | [`ports`] | `TextGenerator` and `QuestionStore` port traits |
//! | [`pipeline`] | The `QuizPipeline` orchestrator |

pub mod errors;
pub mod identifiers;
pub mod parse;
pub mod pipeline;
pub mod ports;
pub mod prompt;
pub mod sanitize;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{
    ExtractionError, GenerationError, ParseError, RequestError, RetryPolicy, Stage, StoreError,
    TransportError,
};
pub use identifiers::{QuestionId, QuizId};
pub use parse::parse;
pub use pipeline::QuizPipeline;
pub use ports::{QuestionStore, TextGenerator};
pub use prompt::build_prompt;
pub use sanitize::sanitize;
pub use types::{
    Difficulty, GenerationOutcome, GenerationRequest, QuestionRecord, QuestionType, Quiz,
    Timestamp,
};
