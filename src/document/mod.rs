/*!
 * Document handling for bilingual output.
 *
 * This module turns raw text into translatable units and renders translated
 * units back into a standalone HTML document:
 * - Sentence segmentation with binary-artifact filtering
 * - Page range selection by estimated sentences per page
 * - HTML fragment and document rendering
 * - Placeholder phonetic transcription
 */

pub mod page_range;
pub mod phonetics;
pub mod renderer;
pub mod segmenter;

// Re-export types used by other modules
pub use page_range::{DEFAULT_SENTENCES_PER_PAGE, PageRange, PageRangeFilter};
pub use phonetics::simple_phonetics;
pub use renderer::{DocumentRenderer, escape_html};
pub use segmenter::SentenceSegmenter;
