//! Strict parsing of sanitised model output into question records.
//!
//! The input is untrusted text that the prompt *asked* to be a JSON object of
//! a documented shape. This module classifies it into exactly one of three
//! outcomes: records, a deliberate refusal, or a typed failure. It validates
//! *structure*, not truth.
//!
//! Two deliberately unusual policies, both part of the documented contract
//! with the model:
//!
//! - The `success` flag is the literal **string** `"true"`, not a JSON
//!   boolean. Any other value — including boolean `true` — is falsy. The
//!   comparison is isolated in [`is_success_flag`] so the ambiguity is
//!   visible and testable in one place.
//! - Question items are mapped field-by-field with defaults for anything
//!   absent or mistyped, so one malformed item never sinks the whole batch.
//!   See [`record_from_item`].

use serde_json::Value;

use crate::errors::ParseError;
use crate::identifiers::QuestionId;
use crate::types::{GenerationOutcome, QuestionRecord, Timestamp};

/// The literal-string success contract with the model.
///
/// Returns `true` only for the JSON string `"true"`. A JSON boolean `true`,
/// the string `"True"`, a number, or an absent field are all falsy.
fn is_success_flag(value: &Value) -> bool {
    value.as_str() == Some("true")
}

/// The model's stated refusal reason, or `"unknown"` if it supplied none.
fn refusal_reason(envelope: &Value) -> String {
    envelope
        .get("error")
        .and_then(Value::as_str)
        .filter(|reason| !reason.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Maps one element of the `questions` array to a record.
///
/// Default-on-missing-field policy: `question` and `correct_option` default
/// to the empty string, `options` to the empty list, when the field is absent
/// or not of the expected type. A fresh [`QuestionId`] and the current time
/// are assigned here — the model never supplies either.
fn record_from_item(item: &Value) -> QuestionRecord {
    let prompt_text = item
        .get("question")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    // The whole array must be strings; a mixed-type array yields no options.
    let options = item
        .get("options")
        .and_then(|v| serde_json::from_value::<Vec<String>>(v.clone()).ok())
        .unwrap_or_default();

    let correct_option = item
        .get("correct_option")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    QuestionRecord {
        id: QuestionId::new_random(),
        prompt_text,
        options,
        correct_option,
        created_at: Timestamp::now(),
    }
}

/// Parses sanitised model output into a [`GenerationOutcome`].
///
/// Total on malformed input — never panics. Policy, in order:
///
/// 1. Input whose first non-whitespace character is not `{` fails with
///    [`ParseError::NotJson`].
/// 2. A JSON parse failure maps to [`ParseError::InvalidJson`].
/// 3. A falsy success flag classifies the reply as a refusal.
/// 4. A truthy reply without a `questions` array fails with
///    [`ParseError::MissingQuestions`] — a successful-but-empty quiz is not
///    a valid outcome.
/// 5. Items map independently through [`record_from_item`], preserving model
///    order; no reordering, no dedup.
pub fn parse(sanitized: &str) -> GenerationOutcome {
    if !sanitized.trim_start().starts_with('{') {
        return GenerationOutcome::Failed(ParseError::NotJson.into());
    }

    let envelope: Value = match serde_json::from_str(sanitized) {
        Ok(value) => value,
        Err(err) => {
            return GenerationOutcome::Failed(
                ParseError::InvalidJson {
                    message: err.to_string(),
                }
                .into(),
            );
        }
    };

    let success = envelope.get("success").map(is_success_flag).unwrap_or(false);
    if !success {
        return GenerationOutcome::Refused {
            reason: refusal_reason(&envelope),
        };
    }

    let Some(items) = envelope.get("questions").and_then(Value::as_array) else {
        return GenerationOutcome::Failed(ParseError::MissingQuestions.into());
    };

    let questions = items.iter().map(record_from_item).collect();
    GenerationOutcome::Success(questions)
}
