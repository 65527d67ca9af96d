/*!
 * Document translation orchestration.
 *
 * Drives one job from raw text to a finished document:
 * - Input checks and translator readiness
 * - Segmentation and page range selection
 * - A strictly sequential per-sentence translation loop
 * - Progress, completion and error events
 *
 * A failed sentence never fails the job; it is rendered inline as an error
 * fragment and counted as processed. Only input problems and translator
 * initialization are fatal.
 */

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::app_config::DocumentConfig;
use crate::document::{DocumentRenderer, PageRangeFilter, SentenceSegmenter, simple_phonetics};
use crate::errors::JobError;
use crate::providers::Translator;
use crate::translation::cache::TranslationCache;
use crate::translation::cancellation::CancellationFlag;
use crate::translation::events::{EventSink, JobEvent};
use crate::translation::job::{ProgressState, TranslationJob};

/// Lifecycle of a job inside the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Segmenting,
    Filtering,
    Translating,
    Completed,
    Failed,
    Cancelled,
}

/// How a job ended
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The document was produced
    Completed {
        /// Standalone HTML document
        document: String,
        /// Sentences finished, including failed ones
        processed: usize,
        /// Sentences selected for translation
        total: usize,
    },
    /// The job stopped with a fatal error
    Failed(JobError),
    /// The job was cancelled by its owner
    Cancelled,
}

impl JobOutcome {
    /// Terminal state matching the outcome
    pub fn state(&self) -> JobState {
        match self {
            JobOutcome::Completed { .. } => JobState::Completed,
            JobOutcome::Failed(_) => JobState::Failed,
            JobOutcome::Cancelled => JobState::Cancelled,
        }
    }
}

/// Tracks and logs state transitions of one job
struct StateTracker {
    job_id: Uuid,
    state: JobState,
}

impl StateTracker {
    fn new(job_id: Uuid) -> Self {
        Self {
            job_id,
            state: JobState::Idle,
        }
    }

    fn advance(&mut self, next: JobState) {
        debug!("Job {}: {:?} -> {:?}", self.job_id, self.state, next);
        self.state = next;
    }
}

/// Runs translation jobs against a translator
#[derive(Debug, Clone)]
pub struct TranslationOrchestrator {
    renderer: DocumentRenderer,
    page_filter: PageRangeFilter,
    keep_cover: bool,
    cache: Option<TranslationCache>,
}

impl Default for TranslationOrchestrator {
    fn default() -> Self {
        Self::new(&DocumentConfig::default())
    }
}

impl TranslationOrchestrator {
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            renderer: DocumentRenderer::new(config.cover_max_chars),
            page_filter: PageRangeFilter::new(config.sentences_per_page),
            keep_cover: config.keep_cover,
            cache: None,
        }
    }

    /// Consult `cache` before calling the translator
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&TranslationCache> {
        self.cache.as_ref()
    }

    /// Run a job to its end
    ///
    /// Emits `Initiate` first and at most one terminal event. Once `cancel`
    /// is set no further events are delivered and the outcome is `Cancelled`.
    pub async fn run(
        &self,
        job: &TranslationJob,
        translator: &dyn Translator,
        events: &EventSink,
        cancel: &CancellationFlag,
    ) -> JobOutcome {
        let mut tracker = StateTracker::new(job.id);
        events.emit(JobEvent::Initiate { job_id: job.id });

        info!(
            "Starting translation job {} ({} -> {}) with {}",
            job.id,
            job.source_language,
            job.target_language,
            translator.name()
        );

        if job.text.trim().is_empty() {
            return self.fail(&mut tracker, events, JobError::EmptyInput);
        }
        if job.text.trim_start().starts_with("%PDF-") {
            return self.fail(&mut tracker, events, JobError::RawBinaryInput);
        }

        let prepared = tokio::select! {
            biased;
            _ = cancel.cancelled() => return self.cancelled(&mut tracker),
            result = translator.prepare() => result,
        };
        if let Err(e) = prepared {
            return self.fail(&mut tracker, events, JobError::Initialization(e.to_string()));
        }

        tracker.advance(JobState::Segmenting);
        let sentences = SentenceSegmenter::segment(&job.text);

        tracker.advance(JobState::Filtering);
        let selected = self.page_filter.filter(&sentences, job.page_range.as_ref());
        if selected.is_empty() || (selected.len() == 1 && selected[0].trim().is_empty()) {
            return self.fail(&mut tracker, events, JobError::NoTranslatableContent);
        }

        info!(
            "Translating {} of {} sentences{}",
            selected.len(),
            sentences.len(),
            job.page_range
                .map(|r| format!(" (pages {})", r))
                .unwrap_or_default()
        );

        tracker.advance(JobState::Translating);
        let request = job.request();
        let mut progress = ProgressState::new(selected.len());

        if self.keep_cover && job.includes_cover() {
            if let Some(cover) = self.renderer.render_cover(&job.text) {
                progress.push_markup(&cover);
            }
        }

        for sentence in selected {
            if sentence.trim().is_empty() {
                continue;
            }
            if cancel.is_cancelled() {
                return self.cancelled(&mut tracker);
            }

            let phonetic = job.include_phonetics.then(|| simple_phonetics(sentence));
            let cached = self
                .cache
                .as_ref()
                .and_then(|c| c.get(sentence, &request.source_language, &request.target_language));

            let result = match cached {
                Some(hit) => Ok(hit),
                None => {
                    let on_partial = |partial: &str| {
                        let pending = self.renderer.render_fragment(sentence, partial, phonetic.as_deref());
                        events.emit(JobEvent::Progress {
                            output: progress.with_pending(&pending),
                            processed: progress.processed(),
                            total: progress.total(),
                            speculative: true,
                        });
                    };

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return self.cancelled(&mut tracker),
                        result = translator.translate(sentence, &request, Some(&on_partial)) => result,
                    }
                }
            };

            let fragment = match result {
                Ok(translation) => {
                    if let Some(cache) = &self.cache {
                        cache.store(sentence, &request.source_language, &request.target_language, &translation);
                    }
                    self.renderer.render_fragment(sentence, &translation, phonetic.as_deref())
                }
                Err(e) => {
                    warn!("Failed to translate sentence {}: {}", progress.processed() + 1, e);
                    self.renderer.render_error_fragment(sentence, &e.to_string())
                }
            };

            progress.complete_sentence(&fragment);
            events.emit(JobEvent::Progress {
                output: progress.output().to_string(),
                processed: progress.processed(),
                total: progress.total(),
                speculative: false,
            });
        }

        if cancel.is_cancelled() {
            return self.cancelled(&mut tracker);
        }

        let processed = progress.processed();
        let total = progress.total();
        let document = self
            .renderer
            .render_document(progress.output(), &job.source_language, &job.target_language);

        events.emit(JobEvent::Complete {
            document: document.clone(),
        });
        tracker.advance(JobState::Completed);
        info!("Job {} completed: {}/{} sentences", job.id, processed, total);

        JobOutcome::Completed {
            document,
            processed,
            total,
        }
    }

    fn fail(&self, tracker: &mut StateTracker, events: &EventSink, error: JobError) -> JobOutcome {
        error!("Job {} failed: {}", tracker.job_id, error);
        events.emit(JobEvent::Error {
            reason: error.to_string(),
        });
        tracker.advance(JobState::Failed);
        JobOutcome::Failed(error)
    }

    fn cancelled(&self, tracker: &mut StateTracker) -> JobOutcome {
        info!("Job {} cancelled", tracker.job_id);
        tracker.advance(JobState::Cancelled);
        JobOutcome::Cancelled
    }
}
