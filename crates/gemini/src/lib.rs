//! Gemini provider infrastructure adapter.
//!
//! Implements the [`quiz::TextGenerator`] trait for Google's
//! `generateContent` endpoint. Additional providers are added as new adapter
//! crates without any changes to the `quiz` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, request formatting, and provider
//! envelope extraction live here. The [`quiz`] crate sees only
//! [`quiz::TextGenerator`]: the text handed back already has the envelope
//! stripped, so swapping providers replaces only this crate.
//!
//! ## Credential handling
//!
//! The endpoint authenticates with an API key passed as a URL query
//! parameter. The key is wrapped in [`ApiKey`], whose `Debug` output is
//! redacted, and transport errors are stripped of their URL before being
//! surfaced — the key must never reach logs or error messages.

pub mod envelope;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use quiz::{GenerationError, TextGenerator, TransportError};

/// Default `generateContent` endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Timeout applied to every generation request.
///
/// The endpoint can hang indefinitely on its own; an elapsed timeout surfaces
/// as [`TransportError::Unreachable`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// The Gemini API key.
///
/// `Debug` prints a redaction marker instead of the key. There is no
/// `Display` implementation; the only way out is [`ApiKey::expose`], used at
/// the single point where the request URL is built.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key obtained from the environment.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for query-parameter construction.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(redacted)")
    }
}

// ---------------------------------------------------------------------------
// Request wire shape
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// Wraps the prompt as the sole user message.
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`TextGenerator`] implementation over the Gemini HTTP API.
///
/// Issues exactly one request per call; retry policy, if any, belongs to the
/// caller. Connection pooling is internal to [`reqwest::Client`] and not
/// visible to the domain.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
}

impl GeminiClient {
    /// Creates a client against the default endpoint.
    pub fn new(api_key: ApiKey) -> Result<Self, GenerationError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Creates a client against a custom endpoint (e.g. a local proxy).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: ApiKey,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| TransportError::Unreachable {
                message: format!("failed to initialise HTTP client: {err}"),
            })?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Strips the URL (which carries the key) from a reqwest error before it
    /// can surface in logs or messages.
    fn unreachable(err: reqwest::Error) -> TransportError {
        TransportError::Unreachable {
            message: err.without_url().to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose())])
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerationError::from(Self::unreachable(err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::ServerError {
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| GenerationError::from(Self::unreachable(err)))?;
        debug!(bytes = bytes.len(), "provider envelope received");

        let text = envelope::extract_text(&bytes)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("AIza-super-secret");
        let printed = format!("{key:?}");
        assert!(!printed.contains("secret"));
        assert_eq!(printed, "ApiKey(redacted)");
    }

    #[test]
    fn request_body_wraps_prompt_as_sole_user_message() {
        let body = GenerateContentRequest::from_prompt("the prompt");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "the prompt"}]}]
            })
        );
    }
}
