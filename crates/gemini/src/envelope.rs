//! Extraction of generated text from the provider envelope.
//!
//! The envelope is the outer JSON the endpoint wraps around the model's
//! output: `candidates[0].content.parts[0].text`. Everything that knows this
//! shape lives in this module; downstream stages see only the inner text.
//!
//! Decoding is schema-validated: every expected key is a required field of a
//! typed DTO, so a missing key or wrong shape fails as
//! [`ExtractionError::MalformedEnvelope`] instead of silently defaulting.

use serde::Deserialize;

use quiz::ExtractionError;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Pulls the model's generated text out of the raw response body.
///
/// Fails with [`ExtractionError::MalformedEnvelope`] if the body is not the
/// documented envelope, either array is empty, or the extracted text is
/// empty. This indicates provider contract drift, not a model failure.
pub fn extract_text(raw: &[u8]) -> Result<String, ExtractionError> {
    let envelope: GenerateContentResponse =
        serde_json::from_slice(raw).map_err(|err| ExtractionError::MalformedEnvelope {
            detail: err.to_string(),
        })?;

    let text = envelope
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| malformed("candidates array is empty"))?
        .content
        .parts
        .into_iter()
        .next()
        .ok_or_else(|| malformed("parts array is empty"))?
        .text;

    if text.is_empty() {
        return Err(malformed("generated text is empty"));
    }

    Ok(text)
}

fn malformed(detail: &str) -> ExtractionError {
    ExtractionError::MalformedEnvelope {
        detail: detail.to_owned(),
    }
}
