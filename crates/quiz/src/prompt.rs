//! Deterministic prompt construction.
//!
//! The generation endpoint has no structured schema parameter, so everything
//! the model must honour — the exact count, the option shape, the target
//! language, the JSON envelope, and the refusal contract — is encoded in the
//! instruction text itself. [`build_prompt`] is a pure function: identical
//! requests always yield identical prompt text, which keeps golden-file
//! testing possible.

use crate::types::{GenerationRequest, QuestionType};

/// Worked example options block for the requested question shape.
///
/// Multiple-choice shows four labeled placeholders; true-false is fixed to
/// exactly `A) True` / `B) False`.
fn options_block(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::MultipleChoice => {
            r#""A) Option 1",
        "B) Option 2",
        "C) Option 3",
        "D) Option 4""#
        }
        QuestionType::TrueFalse => {
            r#""A) True",
        "B) False""#
        }
    }
}

/// Per-type description of the `options` requirement.
fn options_requirement(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::MultipleChoice => "4 options labeled A) to D)",
        QuestionType::TrueFalse => "2 options: A) True, B) False",
    }
}

/// Builds the exact instruction text sent to the model.
///
/// Pure and deterministic over the validated [`GenerationRequest`].
pub fn build_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"You are a professional AI for generating quiz questions.

**Task**: Create exactly **{count}** **{question_type}** questions on the topic: **"{topic}"**
**Difficulty**: {difficulty}
**Language**: Use **only {language}** in questions, options, and answers.
**Output Format**: Return a **valid JSON object** in the structure shown below.
**Output Only**: Return **only JSON**. Do not include any explanations, comments, or text outside the JSON.

**Requirements**:
- Each question must have:
    - A `question` field with the question text.
    - An `options` array with {options_requirement}.
    - A `correct_option` field that exactly matches one of the option strings.
- **Do NOT include any explanation, metadata, or preamble.**

**JSON Example Format**:
{{
  "success": "true",
  "error": "",
  "questions": [
    {{
      "question": "Question text here",
      "options": [
        {options_block}
      ],
      "correct_option": "A) ..."
    }}
  ]
}}

If the topic is inappropriate, irrelevant, or contains sensitive, obscene, or offensive content, respond with a JSON like this:

{{
  "success": "false",
  "error": "Topic contains inappropriate content or is irrelevant."
}}

Ensure your output is:
- Fully parsable as JSON
- Free of trailing commas
- Encoded in **UTF-8 plain text**"#,
        count = request.count(),
        question_type = request.question_type(),
        topic = request.topic(),
        difficulty = request.difficulty(),
        language = request.language(),
        options_requirement = options_requirement(request.question_type()),
        options_block = options_block(request.question_type()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, GenerationRequest, QuestionType};

    fn request(question_type: QuestionType) -> GenerationRequest {
        GenerationRequest::new("Photosynthesis", Difficulty::Hard, question_type, "German", 7)
            .unwrap()
    }

    #[test]
    fn prompt_is_deterministic() {
        let request = request(QuestionType::MultipleChoice);
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn prompt_encodes_count_type_topic_and_language() {
        let prompt = build_prompt(&request(QuestionType::MultipleChoice));
        assert!(prompt.contains("exactly **7** **Multiple Choice** questions"));
        assert!(prompt.contains(r#"the topic: **"Photosynthesis"**"#));
        assert!(prompt.contains("**Difficulty**: Hard"));
        assert!(prompt.contains("Use **only German** in questions, options, and answers."));
    }

    #[test]
    fn multiple_choice_prompt_shows_four_labeled_options() {
        let prompt = build_prompt(&request(QuestionType::MultipleChoice));
        assert!(prompt.contains("4 options labeled A) to D)"));
        assert!(prompt.contains(r#""D) Option 4""#));
    }

    #[test]
    fn true_false_prompt_fixes_the_two_options() {
        let prompt = build_prompt(&request(QuestionType::TrueFalse));
        assert!(prompt.contains("2 options: A) True, B) False"));
        assert!(prompt.contains(r#""A) True""#));
        assert!(prompt.contains(r#""B) False""#));
        assert!(!prompt.contains("Option 3"));
    }

    #[test]
    fn prompt_states_the_refusal_contract() {
        let prompt = build_prompt(&request(QuestionType::MultipleChoice));
        assert!(prompt.contains(r#""success": "false""#));
        assert!(prompt.contains("inappropriate, irrelevant"));
    }

    #[test]
    fn prompt_demands_plain_json_output() {
        let prompt = build_prompt(&request(QuestionType::MultipleChoice));
        assert!(prompt.contains("Return **only JSON**"));
        assert!(prompt.contains("Free of trailing commas"));
        assert!(prompt.contains("UTF-8"));
    }
}
