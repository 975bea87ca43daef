//! Quizgen CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse arguments** — topic, difficulty, question type, language, count.
//! 2. **Wire observability** — configure `tracing-subscriber` with an
//!    env-filter layer. All `tracing` spans and structured events emitted by
//!    every crate in the workspace flow through this layer.
//! 3. **Read configuration** — the API key comes from the `GEMINI_API_KEY`
//!    environment variable; its absence is a fatal configuration error, not a
//!    pipeline-level failure.
//! 4. **Construct infrastructure** — create the `GeminiClient` and, when
//!    `--save` is given, the `JsonFileStore`, and inject them into
//!    `QuizPipeline`.
//! 5. **Report the outcome** — questions on success, the model's own reason
//!    on refusal, a stage-tagged diagnostic on failure.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use gemini::{ApiKey, GeminiClient};
use quiz::{
    Difficulty, GenerationOutcome, GenerationRequest, QuestionStore, QuestionType, Quiz,
    QuizPipeline,
};
use store::JsonFileStore;

/// Environment variable holding the Gemini API key.
const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Parser)]
#[command(name = "quizgen", version, about = "Generate quiz questions from a topic")]
struct Cli {
    /// Topic to generate questions about (1-250 characters).
    #[arg(long)]
    topic: String,

    /// Difficulty of the generated questions.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Medium)]
    difficulty: DifficultyArg,

    /// Shape of the generated questions.
    #[arg(long, value_enum, default_value_t = QuestionTypeArg::MultipleChoice)]
    question_type: QuestionTypeArg,

    /// Human-readable name of the language all generated text must use.
    #[arg(long, default_value = "English")]
    language: String,

    /// Number of questions to generate (1-50).
    #[arg(long, default_value_t = 5)]
    count: u32,

    /// Persist the generated quiz to the store file.
    #[arg(long)]
    save: bool,

    /// Path of the store file used with --save.
    #[arg(long, default_value = "quizgen.json")]
    store: PathBuf,

    /// Override the generation endpoint (e.g. a local proxy).
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QuestionTypeArg {
    MultipleChoice,
    TrueFalse,
}

impl From<QuestionTypeArg> for QuestionType {
    fn from(arg: QuestionTypeArg) -> Self {
        match arg {
            QuestionTypeArg::MultipleChoice => QuestionType::MultipleChoice,
            QuestionTypeArg::TrueFalse => QuestionType::TrueFalse,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let api_key = std::env::var(API_KEY_VAR)
        .map(ApiKey::new)
        .with_context(|| format!("{API_KEY_VAR} is not set"))?;

    let request = GenerationRequest::new(
        &cli.topic,
        cli.difficulty.into(),
        cli.question_type.into(),
        &cli.language,
        cli.count,
    )?;

    let client = match &cli.endpoint {
        Some(endpoint) => GeminiClient::with_endpoint(endpoint, api_key)?,
        None => GeminiClient::new(api_key)?,
    };
    let pipeline = QuizPipeline::new(client);

    match pipeline.run(&request).await {
        GenerationOutcome::Success(questions) => {
            for (index, question) in questions.iter().enumerate() {
                println!("{}. {}", index + 1, question.prompt_text);
                for option in &question.options {
                    println!("   {option}");
                }
                if question.has_valid_answer() {
                    println!("   Answer: {}", question.correct_option);
                } else {
                    println!("   Answer: (no option marked correct)");
                }
                println!();
            }

            if cli.save {
                let store = JsonFileStore::open(&cli.store).await?;
                let quiz = Quiz::new(request.topic(), questions);
                store.save_quiz(quiz).await?;
                println!("Saved to {}", cli.store.display());
            }
            Ok(())
        }
        GenerationOutcome::Refused { reason } => {
            // A refusal is a classification, not a fault: show the model's
            // reason verbatim instead of a generic error.
            println!("The model declined to generate this quiz: {reason}");
            Ok(())
        }
        GenerationOutcome::Failed(err) => {
            bail!("generation failed at the {} stage: {err}", err.stage())
        }
    }
}
