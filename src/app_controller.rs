use anyhow::{Context, Result, anyhow};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::{Config, TranslationProvider};
use crate::document::PageRange;
use crate::errors::{AppError, ProviderError};
use crate::extraction::{Extractor, TextFileExtractor};
use crate::file_utils::{FileManager, TEXT_EXTENSIONS};
use crate::language_detection::{Detection, DetectionReport, LanguageClassifier};
use crate::language_utils;
use crate::providers::echo::EchoTranslator;
use crate::providers::http::HttpTranslator;
use crate::providers::{LazyTranslator, Translator};
use crate::translation::{
    JobEvent, JobOutcome, TranslationCache, TranslationJob, TranslationOrchestrator, TranslationSession,
};

// @module: Application controller for document translation

/// Characters of input used to guess the source language
pub const DETECTION_SAMPLE_CHARS: usize = 1000;

/// Source language assumed when detection is inconclusive
pub const FALLBACK_SOURCE_LANGUAGE: &str = "deu_Latn";

/// Extension of generated documents
const OUTPUT_EXTENSION: &str = "html";

/// Counts from a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Sentence translator shared by all jobs
    translator: Arc<dyn Translator>,
    // @field: Input text extractor
    extractor: Arc<dyn Extractor>,
    // @field: Sentence cache shared across files
    cache: TranslationCache,
    // @field: Pages to translate
    page_range: Option<PageRange>,
    // @field: Draw progress bars and react to Ctrl-C
    interactive: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let translator = Self::build_translator(&config);
        Ok(Self::with_translator(config, translator))
    }

    /// Create a controller around an existing translator
    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        let cache = TranslationCache::new(config.translation.enable_cache);
        Self {
            config,
            translator,
            extractor: Arc::new(TextFileExtractor::new()),
            cache,
            page_range: None,
            interactive: true,
        }
    }

    /// Restrict translation to a page range
    pub fn with_page_range(mut self, page_range: Option<PageRange>) -> Self {
        self.page_range = page_range;
        self
    }

    /// Replace the text extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Disable progress bars and interrupt handling
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the translator selected by the configuration
    ///
    /// The HTTP client is created lazily on first use so a bad endpoint is
    /// reported as a job initialization error rather than at startup.
    pub fn build_translator(config: &Config) -> Arc<dyn Translator> {
        match config.translation.provider {
            TranslationProvider::Echo => Arc::new(EchoTranslator::new()),
            TranslationProvider::Http => {
                let settings = config.translation.clone();
                Arc::new(LazyTranslator::new("http", move || {
                    let settings = settings.clone();
                    async move {
                        let client = HttpTranslator::new(
                            &settings.endpoint,
                            settings.timeout_secs,
                            settings.retry_count,
                            settings.retry_backoff_ms,
                        )?;
                        Ok::<_, ProviderError>(Arc::new(client) as Arc<dyn Translator>)
                    }
                }))
            }
        }
    }

    /// Guess the language of a text from its opening characters
    pub fn detect_language(text: &str) -> DetectionReport {
        let sample: String = text.chars().take(DETECTION_SAMPLE_CHARS).collect();
        LanguageClassifier::default().report(&sample)
    }

    /// Guess the language of a file, reading it the way `run` does
    pub async fn detect_file_language(&self, input_file: &Path) -> Result<DetectionReport> {
        let text = self
            .extractor
            .extract(input_file)
            .await
            .map_err(AppError::from)
            .with_context(|| format!("Failed to extract text from {:?}", input_file))?;
        Ok(Self::detect_language(&text))
    }

    /// Source language for a text: the configured one, or a detected one for `auto`
    pub fn resolve_source_language(&self, text: &str) -> String {
        if !self.config.auto_detect_source() {
            return self.config.source_language.clone();
        }

        let report = Self::detect_language(text);
        match report.detection {
            Detection::Language(code) => {
                info!(
                    "Detected source language: {} ({})",
                    language_utils::get_language_name(&code).unwrap_or_else(|_| code.clone()),
                    code
                );
                code
            }
            Detection::Unknown if !report.tied.is_empty() => {
                warn!(
                    "Source language is ambiguous between {}, assuming {} (pass -s to choose)",
                    report.tied.join(", "),
                    FALLBACK_SOURCE_LANGUAGE
                );
                FALLBACK_SOURCE_LANGUAGE.to_string()
            }
            Detection::Unknown => {
                warn!(
                    "Could not detect the source language, assuming {}",
                    FALLBACK_SOURCE_LANGUAGE
                );
                FALLBACK_SOURCE_LANGUAGE.to_string()
            }
        }
    }

    /// Output path for an input file
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, output_dir, &self.config.target_language, OUTPUT_EXTENSION)
    }

    /// Translate one file; returns the written path, or `None` when skipped
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, &output_dir, &multi_progress, force_overwrite).await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_dir: &Path,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = self.output_path_for(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, translation already exists (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        let text = self
            .extractor
            .extract(input_file)
            .await
            .map_err(AppError::from)
            .with_context(|| format!("Failed to extract text from {:?}", input_file))?;

        let source_language = self.resolve_source_language(&text);
        if language_utils::language_codes_match(&source_language, &self.config.target_language) {
            warn!("Source and target language are both {}", source_language);
        }

        let job = TranslationJob::new(text, source_language, self.config.target_language.clone())
            .with_phonetics(self.config.document.include_phonetics)
            .with_page_range(self.page_range);

        let document = self.translate_job(job, multi_progress).await?;

        FileManager::write_to_file(&output_path, &document)?;

        let stats = self.cache.stats();
        debug!("Cache: {} hits, {} misses", stats.hits, stats.misses);
        info!(
            "Success: {:?} ({})",
            output_path,
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Run a job in a session and return the finished document
    async fn translate_job(&self, job: TranslationJob, multi_progress: &MultiProgress) -> Result<String> {
        let orchestrator = TranslationOrchestrator::new(&self.config.document).with_cache(self.cache.clone());
        let mut session = TranslationSession::new(Arc::clone(&self.translator), orchestrator);

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        if !self.interactive {
            progress_bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sentences ({percent}%) {msg} {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let mut handle = session.start(job);
        loop {
            let event = if self.interactive {
                tokio::select! {
                    event = handle.next_event() => event,
                    _ = tokio::signal::ctrl_c() => {
                        warn!("Interrupted, cancelling translation");
                        session.cancel();
                        None
                    }
                }
            } else {
                handle.next_event().await
            };

            let Some(event) = event else { break };
            match event {
                JobEvent::Initiate { job_id } => debug!("Job {} started", job_id),
                JobEvent::Progress {
                    processed,
                    total,
                    speculative,
                    ..
                } => {
                    progress_bar.set_length(total as u64);
                    if !speculative {
                        progress_bar.set_position(processed as u64);
                    }
                }
                JobEvent::Complete { .. } => progress_bar.finish_and_clear(),
                JobEvent::Error { reason } => {
                    progress_bar.abandon();
                    error!("Translation failed: {}", reason);
                }
            }
        }

        match handle.outcome().await {
            JobOutcome::Completed { document, processed, total } => {
                debug!("Translated {}/{} sentences", processed, total);
                Ok(document)
            }
            JobOutcome::Failed(e) => Err(AppError::from(e).into()),
            JobOutcome::Cancelled => {
                progress_bar.abandon_with_message("Cancelled");
                Err(anyhow!("Translation cancelled"))
            }
        }
    }

    /// Translate every text file under a directory, next to its input
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let target_suffix = format!(".{}.{}", self.config.target_language, OUTPUT_EXTENSION);
        let files: Vec<PathBuf> = FileManager::find_files(&input_dir, TEXT_EXTENSIONS)?
            .into_iter()
            .filter(|p| !p.to_string_lossy().ends_with(&target_suffix))
            .collect();

        if files.is_empty() {
            return Err(anyhow!("No text files found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        if !self.interactive {
            folder_pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();
        for file in &files {
            let file_name = file.file_name().unwrap_or_default().to_string_lossy().to_string();
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = file.parent().unwrap_or(Path::new(".")).to_path_buf();
            match self.run_with_progress(file, &output_dir, &multi_progress, force_overwrite).await {
                Ok(Some(_)) => summary.translated += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");
        info!(
            "Folder processing completed: {} translated, {} skipped, {} errors ({})",
            summary.translated,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Human-readable elapsed time
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
