/*!
 * Sentence segmentation.
 *
 * Splits raw text into sentence-like units by breaking after terminal
 * punctuation. This is a punctuation heuristic, not linguistic boundary
 * detection: abbreviations such as "Dr." also end a unit. Text pasted from
 * raw PDF containers is cleaned of object, dictionary and stream blocks
 * first, and leftover structural tokens are dropped.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Markers that indicate binary container residue in the text
static BINARY_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%PDF-|\bendobj\b|\b\d+ \d+ obj\b").unwrap()
});

/// PDF header through the page tree reference
static PDF_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)%PDF-\d+\.\d+.*?<</Pages").unwrap()
});

/// `<< ... >>` dictionaries
static PDF_DICTIONARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<<[^>]*>>").unwrap()
});

/// `N N obj ... endobj` blocks
static PDF_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\d+ \d+ obj.*?endobj").unwrap()
});

/// `stream ... endstream` blocks
static PDF_STREAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)stream.*?endstream").unwrap()
});

/// Terminal punctuation followed by whitespace
static TERMINAL_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([.!?])\s+").unwrap()
});

/// Terminal punctuation closed by quotes or brackets, then whitespace
static CLOSED_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([.!?]["')\]]+)\s+"#).unwrap()
});

/// Whole lines that are structural leftovers rather than prose
static ARTIFACT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+\s+\d+\s+\d+|/[A-Z][a-zA-Z]*|obj|endobj|stream|endstream)$").unwrap()
});

/// Splits raw text into an ordered sequence of sentences
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    /// Segment text into trimmed, non-empty sentences in input order
    pub fn segment(text: &str) -> Vec<String> {
        let cleaned = Self::strip_binary_artifacts(text);

        let marked = TERMINAL_BOUNDARY.replace_all(&cleaned, "${1}\n");
        let marked = CLOSED_BOUNDARY.replace_all(&marked, "${1}\n");

        marked
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !Self::is_artifact(line))
            .map(str::to_string)
            .collect()
    }

    /// Remove PDF container blocks when the text carries container markers
    pub fn strip_binary_artifacts(text: &str) -> String {
        if !BINARY_MARKERS.is_match(text) {
            return text.to_string();
        }

        let text = PDF_HEADER.replace_all(text, "");
        let text = PDF_DICTIONARY.replace_all(&text, "");
        let text = PDF_OBJECT.replace_all(&text, "");
        let text = PDF_STREAM.replace_all(&text, "");
        text.into_owned()
    }

    /// Check whether a trimmed line is a structural token or a comment
    pub fn is_artifact(line: &str) -> bool {
        line.starts_with('%') || ARTIFACT_LINE.is_match(line)
    }
}
