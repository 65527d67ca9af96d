/*!
 * Translation jobs and their progress accounting.
 */

use uuid::Uuid;

use crate::document::PageRange;
use crate::providers::TranslateRequest;

/// One document translation request
#[derive(Debug, Clone)]
pub struct TranslationJob {
    /// Unique identifier, reported in `Initiate`
    pub id: Uuid,
    /// Raw source text
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Whether to add a phonetic line under each original sentence
    pub include_phonetics: bool,
    /// Pages to translate; all when unset
    pub page_range: Option<PageRange>,
}

impl TranslationJob {
    pub fn new(text: impl Into<String>, source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            include_phonetics: false,
            page_range: None,
        }
    }

    pub fn with_phonetics(mut self, include_phonetics: bool) -> Self {
        self.include_phonetics = include_phonetics;
        self
    }

    pub fn with_page_range(mut self, page_range: Option<PageRange>) -> Self {
        self.page_range = page_range;
        self
    }

    /// Language pair for translator calls
    pub fn request(&self) -> TranslateRequest {
        TranslateRequest::new(&self.source_language, &self.target_language)
    }

    /// Whether the cover excerpt belongs in the output
    pub fn includes_cover(&self) -> bool {
        self.page_range.is_none_or(|range| range.starts_at_first_page())
    }
}

/// Running totals of one job
///
/// Output only grows, fragments stay in input order, and `processed` never
/// exceeds `total`.
#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    processed: usize,
    total: usize,
    output: String,
}

impl ProgressState {
    pub fn new(total: usize) -> Self {
        Self {
            processed: 0,
            total,
            output: String::new(),
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Append markup that does not correspond to a sentence
    pub fn push_markup(&mut self, markup: &str) {
        self.output.push_str(markup);
    }

    /// Append a finished sentence's fragment and count it
    pub fn complete_sentence(&mut self, fragment: &str) {
        self.output.push_str(fragment);
        self.processed = (self.processed + 1).min(self.total);
    }

    /// Finalized output followed by an in-flight fragment
    pub fn with_pending(&self, fragment: &str) -> String {
        let mut output = String::with_capacity(self.output.len() + fragment.len());
        output.push_str(&self.output);
        output.push_str(fragment);
        output
    }
}
