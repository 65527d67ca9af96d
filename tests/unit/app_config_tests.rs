/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use leengua::app_config::{Config, LogLevel, TranslationProvider};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "deu_Latn");
    assert_eq!(config.target_language, "spa_Latn");
    assert_eq!(config.translation.provider, TranslationProvider::Http);
    assert_eq!(config.translation.endpoint, "http://localhost:8080/translate");
    assert_eq!(config.translation.timeout_secs, 60);
    assert!(config.translation.enable_cache);
    assert!(!config.document.include_phonetics);
    assert!(config.document.keep_cover);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "xyz_Latn".to_string();
    assert!(config.validate().is_err());

    config.source_language = "auto".to_string();
    assert!(config.validate().is_ok());

    config.target_language = "en".to_string();
    assert!(config.validate().is_err());

    config.target_language = "fra_Latn".to_string();
    config.document.sentences_per_page = 0;
    assert!(config.validate().is_err());

    config.document.sentences_per_page = 10;
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    // The endpoint only matters for the http provider
    config.translation.provider = TranslationProvider::Echo;
    assert!(config.validate().is_ok());
}

/// Test provider name parsing
#[test]
fn test_provider_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("HTTP".parse::<TranslationProvider>().unwrap(), TranslationProvider::Http);
    assert_eq!("echo".parse::<TranslationProvider>().unwrap(), TranslationProvider::Echo);
    assert!("ollama".parse::<TranslationProvider>().is_err());
}

/// Test log level conversion
#[test]
fn test_logLevel_intoLevelFilter_shouldMapEachLevel() {
    assert_eq!(log::LevelFilter::from(LogLevel::Error), log::LevelFilter::Error);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}

/// Test creating and reloading a config file
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::from_file(&path)?;
    assert_eq!(created, reloaded);
    Ok(())
}

/// Test saving a customized config
#[test]
fn test_saveToFile_withCustomValues_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("custom.json");

    let mut config = Config::default();
    config.source_language = "auto".to_string();
    config.document.include_phonetics = true;
    config.document.sentences_per_page = 5;
    config.save_to_file(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.source_language, "auto");
    assert!(loaded.document.include_phonetics);
    assert_eq!(loaded.document.sentences_per_page, 5);
    Ok(())
}

/// Test a malformed config file
#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "{ not json")?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}
