/*!
 * Error types for the leengua application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The translation model could not be loaded or reached
    #[error("Translator failed to initialize: {0}")]
    InitializationFailed(String),

    /// The backend has no model for the requested language pair
    #[error("Unsupported language pair: {source_language} -> {target_language}")]
    UnsupportedLanguagePair {
        /// Source language code
        source_language: String,
        /// Target language code
        target_language: String,
    },
}

/// Errors raised while turning an input file into plain text
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file has no bytes at all
    #[error("File is empty: {0}")]
    Empty(String),

    /// The document is encrypted
    #[error("Document is password-protected: {0}")]
    PasswordProtected(String),

    /// The file was read but holds nothing but whitespace or images
    #[error("No extractable text found in {0}")]
    NoExtractableText(String),

    /// The file is a binary container this extractor cannot read
    #[error("Unsupported document format: {0}")]
    Unsupported(String),

    /// Reading the file failed
    #[error("Failed to read {path}: {message}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying error message
        message: String,
    },
}

/// Job-fatal errors reported through the `error` event
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobError {
    /// The submitted text is empty after trimming
    #[error("empty input")]
    EmptyInput,

    /// Raw PDF bytes were submitted instead of extracted text
    #[error("The input appears to be raw binary document data. Extract its text before translating.")]
    RawBinaryInput,

    /// Segmentation and page filtering left nothing to translate
    #[error("no translatable content: the document may contain only images, be protected, or the page range is empty")]
    NoTranslatableContent,

    /// The translator never became ready
    #[error("translator initialization failed: {0}")]
    Initialization(String),

    /// The requested page range is malformed
    #[error("invalid page range {start}-{end}: pages start at 1 and the end page cannot precede the start page")]
    InvalidPageRange {
        /// First requested page
        start: usize,
        /// Last requested page
        end: usize,
    },

    /// The task running the job stopped abnormally
    #[error("translation task failed: {0}")]
    TaskFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a translation backend
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from text extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error that terminated a translation job
    #[error("Translation job failed: {0}")]
    Job(#[from] JobError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
