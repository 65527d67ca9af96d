/*!
 * HTTP sentence translation client.
 *
 * Talks to a JSON endpoint that translates one text per request:
 * - Request: `POST {"text", "src_lang", "tgt_lang"}`
 * - Success: `200 {"original", "translated", "source_language", "target_language"}`
 * - Failure: `4xx/5xx {"error"}`
 *
 * Language codes are sent as ISO 639-1 when a two-letter code exists, since
 * the usual backends name their models by two-letter pairs. Server errors
 * and network failures are retried with exponential backoff; client errors
 * are returned immediately.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{PartialSink, TranslateRequest, Translator};

/// Request body for the translation endpoint
#[derive(Debug, Serialize)]
struct TranslationRequestBody<'a> {
    text: &'a str,
    src_lang: String,
    tgt_lang: String,
}

/// Successful response body
#[derive(Debug, Deserialize)]
struct TranslationResponseBody {
    translated: String,
}

/// Error response body
#[derive(Debug, Deserialize)]
struct ErrorResponseBody {
    error: String,
}

/// HTTP translator client
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    /// Endpoint receiving translation requests
    endpoint: Url,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl HttpTranslator {
    /// Create a client for `endpoint`
    pub fn new(endpoint: &str, timeout_secs: u64, max_retries: u32, backoff_base_ms: u64) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ProviderError::InitializationFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ProviderError::InitializationFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Wire code for a language: ISO 639-1 when available, otherwise unchanged
    pub fn wire_language_code(code: &str) -> String {
        language_utils::to_iso639_1(code).unwrap_or_else(|_| code.to_string())
    }

    /// Extract the message of an error body, or fall back to the raw text
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorResponseBody>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.trim().to_string())
    }

    /// Backoff before retry `attempt` (1-based)
    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(16)))
    }

    async fn send_once(&self, body: &TranslationRequestBody<'_>) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: Self::error_message(&text),
            });
        }

        serde_json::from_str::<TranslationResponseBody>(&text)
            .map(|r| r.translated)
            .map_err(|e| ProviderError::ParseError(format!("{} in response: {}", e, text)))
    }

    fn is_retryable(error: &ProviderError) -> bool {
        match error {
            ProviderError::ConnectionError(_) | ProviderError::RequestFailed(_) => true,
            ProviderError::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        sentence: &str,
        request: &TranslateRequest,
        _on_partial: Option<&PartialSink<'_>>,
    ) -> Result<String, ProviderError> {
        let body = TranslationRequestBody {
            text: sentence,
            src_lang: Self::wire_language_code(&request.source_language),
            tgt_lang: Self::wire_language_code(&request.target_language),
        };

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(translated) => return Ok(translated),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    error!(
                        "Translation request failed: {} - attempt {}/{}",
                        e,
                        attempt,
                        self.max_retries + 1
                    );
                    let backoff = self.backoff(attempt);
                    debug!("Retrying in {}ms", backoff.as_millis());
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
