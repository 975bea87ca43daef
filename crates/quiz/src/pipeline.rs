//! The generation pipeline orchestrator.
//!
//! Composes the stages in one direction — prompt construction, the generator
//! port, sanitisation, parsing — short-circuiting on the first failure. The
//! generator call is the only suspension point; once text is in hand the
//! remaining stages are pure computation over an already-materialised string,
//! so cancellation (dropping the future) can never expose a partial record
//! list.
//!
//! The pipeline holds no state across calls: each invocation is independent,
//! with no caching and no retry state. Callers may run many invocations
//! concurrently; nothing here is shared or mutable.

use tracing::{debug, info, instrument, warn};

use crate::parse::parse;
use crate::ports::TextGenerator;
use crate::prompt::build_prompt;
use crate::sanitize::sanitize;
use crate::types::{GenerationOutcome, GenerationRequest};

/// Runs one generation request end to end.
pub struct QuizPipeline<G> {
    generator: G,
}

impl<G: TextGenerator> QuizPipeline<G> {
    /// Creates a pipeline over the given generator port.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Executes one request: build prompt, call the model, sanitise, parse.
    ///
    /// Always returns exactly one [`GenerationOutcome`]; failures carry the
    /// stage that produced them and are never accompanied by partial records.
    #[instrument(
        name = "quiz_generation",
        skip(self, request),
        fields(
            topic = %request.topic(),
            question_type = %request.question_type(),
            count = request.count(),
        )
    )]
    pub async fn run(&self, request: &GenerationRequest) -> GenerationOutcome {
        let prompt = build_prompt(request);
        debug!(prompt_chars = prompt.len(), "prompt built");

        let text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!(stage = %err.stage(), error = %err, "generation failed");
                return GenerationOutcome::Failed(err);
            }
        };

        let sanitized = sanitize(&text);
        let outcome = parse(&sanitized);

        match &outcome {
            GenerationOutcome::Success(questions) => {
                info!(
                    questions = questions.len(),
                    requested = request.count(),
                    "generation succeeded"
                );
            }
            GenerationOutcome::Refused { reason } => {
                info!(%reason, "model refused the topic");
            }
            GenerationOutcome::Failed(err) => {
                warn!(stage = %err.stage(), error = %err, "generation failed");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{GenerationError, ParseError, Stage, TransportError};
    use crate::ports::MockTextGenerator;
    use crate::types::{Difficulty, QuestionType};
    use serde_json::json;

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            "The solar system",
            Difficulty::Easy,
            QuestionType::MultipleChoice,
            "English",
            2,
        )
        .unwrap()
    }

    fn pipeline() -> QuizPipeline<MockTextGenerator> {
        QuizPipeline::new(MockTextGenerator::default())
    }

    #[tokio::test]
    async fn happy_path_returns_records_in_model_order() {
        let pipeline = pipeline();
        let envelope = json!({
            "success": "true",
            "error": "",
            "questions": [
                {"question": "Q1", "options": ["A) 1", "B) 2", "C) 3", "D) 4"], "correct_option": "B) 2"},
                {"question": "Q2", "options": ["A) 1", "B) 2", "C) 3", "D) 4"], "correct_option": "A) 1"},
            ],
        });
        pipeline.generator.push_text(envelope.to_string());

        match pipeline.run(&request()).await {
            GenerationOutcome::Success(questions) => {
                assert_eq!(questions.len(), 2);
                assert_eq!(questions[0].prompt_text, "Q1");
                assert_eq!(questions[1].prompt_text, "Q2");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fenced_model_output_is_sanitised_before_parsing() {
        let pipeline = pipeline();
        let body = json!({
            "success": "true",
            "questions": [{"question": "Q", "options": ["A) True", "B) False"], "correct_option": "A) True"}],
        });
        pipeline
            .generator
            .push_text(format!("```json\n{}\n```", body));

        assert!(matches!(
            pipeline.run(&request()).await,
            GenerationOutcome::Success(questions) if questions.len() == 1
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_tagged_with_its_stage() {
        let pipeline = pipeline();
        pipeline
            .generator
            .push_error(TransportError::ServerError { status: 500 });

        match pipeline.run(&request()).await {
            GenerationOutcome::Failed(err) => {
                assert_eq!(err.stage(), Stage::Transport);
                assert_eq!(
                    err,
                    GenerationError::Transport(TransportError::ServerError { status: 500 })
                );
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refusal_reaches_the_caller_with_the_model_reason() {
        let pipeline = pipeline();
        pipeline.generator.push_text(
            json!({"success": "false", "error": "Topic contains inappropriate content."})
                .to_string(),
        );

        assert_eq!(
            pipeline.run(&request()).await,
            GenerationOutcome::Refused {
                reason: "Topic contains inappropriate content.".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn prose_reply_fails_as_not_json() {
        let pipeline = pipeline();
        pipeline
            .generator
            .push_text("Sure! Here are your questions: 1. ...");

        assert_eq!(
            pipeline.run(&request()).await,
            GenerationOutcome::Failed(GenerationError::Parse(ParseError::NotJson))
        );
    }
}
