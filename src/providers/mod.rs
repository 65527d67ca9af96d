/*!
 * Sentence translation backends.
 *
 * This module contains the `Translator` abstraction and its implementations:
 * - `HttpTranslator`: remote sentence translation endpoint
 * - `EchoTranslator`: offline pseudo-translation for dry runs
 * - `MockTranslator`: scripted behaviors for tests
 * - `LazyTranslator`: shared, initialize-once handle around any of them
 */

use async_trait::async_trait;
use log::info;
use futures::future::BoxFuture;
use std::fmt::{self, Debug};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::errors::ProviderError;

pub mod echo;
pub mod http;
pub mod mock;

/// Callback receiving intermediate decodes of the sentence being translated
pub type PartialSink<'a> = dyn for<'s> Fn(&'s str) + Send + Sync + 'a;

/// Language pair for a translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslateRequest {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Common trait for all sentence translators
///
/// Implementations translate one sentence at a time. They may report partial
/// decodes through `on_partial` while the call is in flight; the final
/// return value is authoritative.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single sentence
    ///
    /// # Arguments
    /// * `sentence` - The sentence to translate
    /// * `request` - Source and target languages
    /// * `on_partial` - Optional sink for intermediate decodes
    async fn translate(
        &self,
        sentence: &str,
        request: &TranslateRequest,
        on_partial: Option<&PartialSink<'_>>,
    ) -> Result<String, ProviderError>;

    /// Make the translator ready before the first sentence
    async fn prepare(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Short name for logs
    fn name(&self) -> &str;
}

type TranslatorFactory =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn Translator>, ProviderError>> + Send + Sync>;

/// Translator built on first use and shared afterwards
///
/// Concurrent first callers wait on a single initialization. A failed
/// initialization leaves the handle empty so a later call can try again.
pub struct LazyTranslator {
    name: String,
    factory: TranslatorFactory,
    instance: OnceCell<Arc<dyn Translator>>,
}

impl LazyTranslator {
    /// Create a lazy handle around an async factory
    pub fn new<F, Fut>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn Translator>, ProviderError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(move || Box::pin(factory())),
            instance: OnceCell::new(),
        }
    }

    /// Whether the inner translator has been built
    pub fn is_initialized(&self) -> bool {
        self.instance.initialized()
    }

    /// Get the inner translator, building it if needed
    pub async fn get(&self) -> Result<&Arc<dyn Translator>, ProviderError> {
        self.instance
            .get_or_try_init(|| async {
                info!("Initializing translator: {}", self.name);
                let translator = (self.factory)().await.map_err(|e| match e {
                    ProviderError::InitializationFailed(_) => e,
                    other => ProviderError::InitializationFailed(other.to_string()),
                })?;
                translator.prepare().await.map_err(|e| match e {
                    ProviderError::InitializationFailed(_) => e,
                    other => ProviderError::InitializationFailed(other.to_string()),
                })?;
                Ok(translator)
            })
            .await
    }
}

impl Debug for LazyTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTranslator")
            .field("name", &self.name)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[async_trait]
impl Translator for LazyTranslator {
    async fn translate(
        &self,
        sentence: &str,
        request: &TranslateRequest,
        on_partial: Option<&PartialSink<'_>>,
    ) -> Result<String, ProviderError> {
        self.get().await?.translate(sentence, request, on_partial).await
    }

    async fn prepare(&self) -> Result<(), ProviderError> {
        self.get().await.map(|_| ())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
