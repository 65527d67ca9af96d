use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::document::DEFAULT_SENTENCES_PER_PAGE;
use crate::document::renderer::DEFAULT_COVER_MAX_CHARS;
use crate::language_utils::{self, AUTO_DETECT};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code (NLLB, e.g. `deu_Latn`) or `auto`
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (NLLB, e.g. `spa_Latn`)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation backend config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output document config
    #[serde(default)]
    pub document: DocumentConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: JSON sentence translation endpoint
    #[default]
    Http,
    // @provider: Offline echo, for dry runs
    Echo,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Http => "HTTP",
            Self::Echo => "Echo",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Echo => write!(f, "echo"),
        }
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "echo" => Ok(Self::Echo),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation backend configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    // @field: Backend type
    #[serde(default)]
    pub provider: TranslationProvider,

    // @field: Service URL for the http backend
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Retries after a failed request
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Base backoff, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    // @field: Reuse translations of repeated sentences
    #[serde(default = "default_true")]
    pub enable_cache: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            enable_cache: true,
        }
    }
}

/// Output document configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentConfig {
    /// Add a phonetic line under each original sentence
    #[serde(default)]
    pub include_phonetics: bool,

    /// Sentences counted as one page when selecting page ranges
    #[serde(default = "default_sentences_per_page")]
    pub sentences_per_page: usize,

    /// Put an excerpt of the opening paragraph at the top
    #[serde(default = "default_true")]
    pub keep_cover: bool,

    /// Maximum characters of the cover excerpt
    #[serde(default = "default_cover_max_chars")]
    pub cover_max_chars: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            include_phonetics: false,
            sentences_per_page: default_sentences_per_page(),
            keep_cover: true,
            cover_max_chars: default_cover_max_chars(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "deu_Latn".to_string()
}

fn default_target_language() -> String {
    "spa_Latn".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:8080/translate".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_sentences_per_page() -> usize {
    DEFAULT_SENTENCES_PER_PAGE
}

fn default_cover_max_chars() -> usize {
    DEFAULT_COVER_MAX_CHARS
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_language != AUTO_DETECT && !language_utils::is_supported_language(&self.source_language) {
            return Err(anyhow!(
                "Unsupported source language '{}' (use an NLLB code such as deu_Latn, or '{}')",
                self.source_language,
                AUTO_DETECT
            ));
        }

        if !language_utils::is_supported_language(&self.target_language) {
            return Err(anyhow!(
                "Unsupported target language '{}' (use an NLLB code such as spa_Latn)",
                self.target_language
            ));
        }

        if self.document.sentences_per_page == 0 {
            return Err(anyhow!("document.sentences_per_page must be greater than 0"));
        }

        if self.translation.provider == TranslationProvider::Http {
            url::Url::parse(&self.translation.endpoint)
                .with_context(|| format!("Invalid translation endpoint: {}", self.translation.endpoint))?;
        }

        Ok(())
    }

    /// Whether the source language should be detected from the input
    pub fn auto_detect_source(&self) -> bool {
        self.source_language == AUTO_DETECT
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the configuration as pretty JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Load the file at `path`, creating it with defaults when missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save_to_file(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            document: DocumentConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
