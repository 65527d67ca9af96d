/*!
 * Text extraction from input files.
 *
 * The `Extractor` trait turns a file into one concatenated text string.
 * `TextFileExtractor` handles plain text and rejects containers it cannot
 * read with a distinct error for each case, so callers can tell an empty
 * file from a protected or image-only document.
 */

use async_trait::async_trait;
use log::debug;
use std::path::Path;

use crate::errors::ExtractionError;

/// Bytes inspected when sniffing for binary content
const SNIFF_LEN: usize = 1024;

/// Source of document text
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract the full text of a file
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Extractor for UTF-8 (or nearly UTF-8) text files
#[derive(Debug, Clone, Default)]
pub struct TextFileExtractor;

impl TextFileExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Turn raw file bytes into text, rejecting unusable inputs
    pub fn extract_bytes(&self, name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty(name.to_string()));
        }

        if bytes.starts_with(b"%PDF-") {
            if contains(bytes, b"/Encrypt") {
                return Err(ExtractionError::PasswordProtected(name.to_string()));
            }
            return Err(ExtractionError::Unsupported(format!(
                "{} is a PDF; extract its text before translating",
                name
            )));
        }

        if bytes[..bytes.len().min(SNIFF_LEN)].contains(&0) {
            return Err(ExtractionError::Unsupported(format!("{} contains binary data", name)));
        }

        let text = String::from_utf8_lossy(bytes);
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
        // Form feeds mark page breaks in exported text
        let text = text.replace('\u{000C}', "\n\n");

        if text.trim().is_empty() {
            return Err(ExtractionError::NoExtractableText(name.to_string()));
        }

        debug!("Extracted {} characters from {}", text.chars().count(), name);
        Ok(text)
    }
}

#[async_trait]
impl Extractor for TextFileExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let name = path.display().to_string();
        let bytes = tokio::fs::read(path).await.map_err(|e| ExtractionError::Io {
            path: name.clone(),
            message: e.to_string(),
        })?;
        self.extract_bytes(&name, &bytes)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
