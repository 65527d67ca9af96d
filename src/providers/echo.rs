/*!
 * Offline pseudo-translator.
 *
 * Echoes each sentence back tagged with the target language and streams it
 * word by word through the partial sink, the way a decoding model would.
 * Useful for dry runs of the full pipeline without a translation backend.
 */

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{PartialSink, TranslateRequest, Translator};

/// Pseudo-translator that tags and echoes its input
#[derive(Debug, Clone, Default)]
pub struct EchoTranslator {
    /// Pause between partial decodes
    word_delay: Duration,
}

impl EchoTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause `delay_ms` between streamed words
    pub fn with_word_delay(mut self, delay_ms: u64) -> Self {
        self.word_delay = Duration::from_millis(delay_ms);
        self
    }

    fn tag(target_language: &str) -> String {
        language_utils::to_iso639_1(target_language).unwrap_or_else(|_| target_language.to_string())
    }
}

#[async_trait]
impl Translator for EchoTranslator {
    async fn translate(
        &self,
        sentence: &str,
        request: &TranslateRequest,
        on_partial: Option<&PartialSink<'_>>,
    ) -> Result<String, ProviderError> {
        let output = format!("[{}] {}", Self::tag(&request.target_language), sentence.trim());

        if let Some(sink) = on_partial {
            let mut partial = String::new();
            for word in output.split_whitespace() {
                if !partial.is_empty() {
                    partial.push(' ');
                }
                partial.push_str(word);
                sink(&partial);

                if self.word_delay.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::time::sleep(self.word_delay).await;
                }
            }
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "echo"
    }
}
