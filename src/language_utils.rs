/*!
 * Language utilities for NLLB-style language codes.
 *
 * Translation models address languages as `<iso639-3>_<Script>` (for
 * example `deu_Latn`). This module validates those codes, resolves
 * display names and maps them to ISO 639-1 for backends that expect
 * two-letter codes.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Placeholder accepted as a source language when it should be detected
pub const AUTO_DETECT: &str = "auto";

/// Supported language codes with their display names, in selector order
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ara_Arab", "Arabic / العربية"),
    ("cmn_Hans", "Chinese (Simplified) / 简体中文"),
    ("deu_Latn", "German / Deutsch"),
    ("eng_Latn", "English"),
    ("fra_Latn", "French / Français"),
    ("hin_Deva", "Hindi / हिन्दी"),
    ("ita_Latn", "Italian / Italiano"),
    ("jpn_Jpan", "Japanese / 日本語"),
    ("kor_Hang", "Korean / 한국어"),
    ("nld_Latn", "Dutch / Nederlands"),
    ("pol_Latn", "Polish / Polski"),
    ("por_Latn", "Portuguese / Português"),
    ("rus_Cyrl", "Russian / Русский"),
    ("spa_Latn", "Spanish / Español"),
    ("swe_Latn", "Swedish / Svenska"),
    ("tur_Latn", "Turkish / Türkçe"),
    ("ukr_Cyrl", "Ukrainian / Українська"),
    ("vie_Latn", "Vietnamese / Tiếng Việt"),
];

/// Check whether a code is one of the supported NLLB codes
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code.trim())
}

/// Split an NLLB code into its ISO 639-3 and script parts
pub fn split_code(code: &str) -> Result<(&str, &str)> {
    let code = code.trim();
    let (lang, script) = code
        .split_once('_')
        .ok_or_else(|| anyhow!("Invalid language code (expected <lang>_<Script>): {}", code))?;

    if lang.len() != 3 || !lang.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(anyhow!("Invalid language part in code: {}", code));
    }
    if script.len() != 4 || !script.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(anyhow!("Invalid script part in code: {}", code));
    }

    Ok((lang, script))
}

/// Get the display name for a supported code, falling back to the ISO name
pub fn get_language_name(code: &str) -> Result<String> {
    let code = code.trim();
    if let Some((_, name)) = SUPPORTED_LANGUAGES.iter().find(|(c, _)| *c == code) {
        return Ok(name.to_string());
    }

    let (lang, _) = split_code(code)?;
    let language = Language::from_639_3(lang)
        .ok_or_else(|| anyhow!("Unknown ISO 639-3 language: {}", lang))?;

    Ok(language.to_name().to_string())
}

/// Map an NLLB code to its ISO 639-1 code
///
/// Macrolanguage members such as `cmn` (Mandarin) have no two-letter code of
/// their own, so they are mapped to their macrolanguage first.
pub fn to_iso639_1(code: &str) -> Result<String> {
    let (lang, _) = split_code(code)?;

    let lang = match lang {
        "cmn" => "zho",
        other => other,
    };

    Language::from_639_3(lang)
        .and_then(|l| l.to_639_1())
        .map(|c| c.to_string())
        .ok_or_else(|| anyhow!("No ISO 639-1 code for language: {}", code))
}

/// Check if two codes refer to the same language, ignoring the script
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (split_code(code1), split_code(code2)) {
        (Ok((a, _)), Ok((b, _))) => a == b,
        _ => false,
    }
}
