/*!
 * Page range selection.
 *
 * Plain text carries no pagination, so pages are approximated by a fixed
 * number of sentences per page.
 */

use std::fmt;

use crate::errors::JobError;

/// Default estimate of sentences on one page
pub const DEFAULT_SENTENCES_PER_PAGE: usize = 20;

/// Inclusive, 1-based page range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: usize,
    end: usize,
}

impl PageRange {
    /// Create a validated range; pages start at 1 and `end >= start`
    pub fn new(start: usize, end: usize) -> Result<Self, JobError> {
        if start == 0 || end < start {
            return Err(JobError::InvalidPageRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range from optional CLI bounds
    ///
    /// A missing start defaults to page 1 and a missing end to the start page.
    /// Returns `None` when neither bound is given.
    pub fn from_bounds(start: Option<usize>, end: Option<usize>) -> Result<Option<Self>, JobError> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(s), None) => Self::new(s, s).map(Some),
            (None, Some(e)) => Self::new(1, e).map(Some),
            (Some(s), Some(e)) => Self::new(s, e).map(Some),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether the range begins on the first page
    pub fn starts_at_first_page(&self) -> bool {
        self.start == 1
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Maps page ranges onto sentence slices
#[derive(Debug, Clone, Copy)]
pub struct PageRangeFilter {
    sentences_per_page: usize,
}

impl Default for PageRangeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SENTENCES_PER_PAGE)
    }
}

impl PageRangeFilter {
    /// Create a filter; a zero estimate is treated as one sentence per page
    pub fn new(sentences_per_page: usize) -> Self {
        Self {
            sentences_per_page: sentences_per_page.max(1),
        }
    }

    pub fn sentences_per_page(&self) -> usize {
        self.sentences_per_page
    }

    /// Select the sentences covered by the range, or all of them without one
    pub fn filter<'a>(&self, sentences: &'a [String], range: Option<&PageRange>) -> &'a [String] {
        let Some(range) = range else {
            return sentences;
        };

        let (start, end) = self.bounds(sentences.len(), range);
        if start >= end {
            return &[];
        }
        &sentences[start..end]
    }

    /// Half-open sentence index bounds for a range, clamped to `len`
    pub fn bounds(&self, len: usize, range: &PageRange) -> (usize, usize) {
        let start = (range.start - 1).saturating_mul(self.sentences_per_page);
        let end = range.end.saturating_mul(self.sentences_per_page).min(len);
        (start, end)
    }

    /// Estimated number of pages for a sentence count
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.sentences_per_page)
    }
}
