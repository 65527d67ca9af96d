/*!
 * Mock translator implementations for testing.
 *
 * This module provides a mock translator that simulates different behaviors:
 * - `MockTranslator::working()` - Always succeeds with a tagged translation
 * - `MockTranslator::fail_on(..)` - Fails on selected calls, succeeds otherwise
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::streaming()` - Reports word-by-word partial decodes
 * - `MockTranslator::init_failure()` - Never becomes ready
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{PartialSink, TranslateRequest, Translator};

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Fails on the given zero-based call indices
    FailOn { calls: Vec<usize> },
    /// Fails intermittently (every Nth call)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Simulates a slow model (for cancellation testing)
    Slow { delay_ms: u64 },
    /// Emits growing partial decodes before returning
    Streaming,
    /// Fails readiness checks
    InitFailure,
}

/// Mock translator for testing orchestration behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Call counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Sentences received, in call order
    received: Arc<Mutex<Vec<String>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str, &TranslateRequest) -> String>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock translator that fails on specific calls
    pub fn fail_on(calls: &[usize]) -> Self {
        Self::new(MockBehavior::FailOn { calls: calls.to_vec() })
    }

    /// Create an intermittently failing mock translator
    ///
    /// Every `fail_every`-th call fails; zero is treated as one.
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock translator that takes `delay_ms` per sentence
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a mock translator that streams partial decodes
    pub fn streaming() -> Self {
        Self::new(MockBehavior::Streaming)
    }

    /// Create a mock translator whose initialization fails
    pub fn init_failure() -> Self {
        Self::new(MockBehavior::InitFailure)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str, &TranslateRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of translate calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Sentences passed to `translate`, in call order
    pub fn received_sentences(&self) -> Vec<String> {
        self.received.lock().clone()
    }

    fn respond(&self, sentence: &str, request: &TranslateRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(sentence, request),
            None => format!("[TRANSLATED to {}] {}", request.target_language, sentence),
        }
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            received: Arc::clone(&self.received),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        sentence: &str,
        request: &TranslateRequest,
        on_partial: Option<&PartialSink<'_>>,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.received.lock().push(sentence.to_string());

        match &self.behavior {
            MockBehavior::Working => Ok(self.respond(sentence, request)),

            MockBehavior::FailOn { calls } => {
                if calls.contains(&count) {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated failure (call #{})", count + 1),
                        status_code: 500,
                    })
                } else {
                    Ok(self.respond(sentence, request))
                }
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (call #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(self.respond(sentence, request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated translator failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(self.respond(sentence, request))
            }

            MockBehavior::Streaming => {
                let full = self.respond(sentence, request);
                if let Some(sink) = on_partial {
                    let words: Vec<&str> = full.split_whitespace().collect();
                    for end in 1..words.len() {
                        sink(&words[..end].join(" "));
                        tokio::task::yield_now().await;
                    }
                }
                Ok(full)
            }

            MockBehavior::InitFailure => Err(ProviderError::InitializationFailed(
                "Simulated model load failure".to_string(),
            )),
        }
    }

    async fn prepare(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::InitFailure => Err(ProviderError::InitializationFailed(
                "Simulated model load failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
