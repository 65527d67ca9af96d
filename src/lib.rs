/*!
 * # Leengua - bilingual sentence-interleaved documents
 *
 * A Rust library that turns a text into a reading document where every
 * original sentence is followed by its translation.
 *
 * ## Features
 *
 * - Sentence segmentation with cleanup of PDF extraction debris
 * - Page range selection over fixed-size sentence pages
 * - Rule-based source language detection for 18 languages
 * - Sequential sentence translation with streamed partial results
 * - Cancellable jobs with an ordered event stream
 * - Standalone HTML output with optional phonetic lines
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: File and folder level driver used by the CLI
 * - `document`: Segmentation, page ranges, phonetics and HTML rendering
 * - `extraction`: Input file to text
 * - `language_detection`: Weighted rule classifier
 * - `language_utils`: Supported language codes and names
 * - `providers`: Sentence translator backends:
 *   - `providers::http`: Remote translation endpoint
 *   - `providers::echo`: Offline pseudo-translation
 *   - `providers::mock`: Scripted translator for tests
 * - `translation`: Jobs, orchestration, sessions, events and cache
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod language_detection;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use document::{PageRange, SentenceSegmenter};
pub use language_detection::{Detection, detect_language};
pub use providers::{TranslateRequest, Translator};
pub use translation::{JobEvent, JobOutcome, TranslationJob, TranslationSession};
