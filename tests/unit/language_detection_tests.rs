/*!
 * Tests for rule-based language detection
 */

use leengua::language_detection::{
    Detection, DetectionRule, LanguageClassifier, LanguageSignature, RuleKind, detect_language,
};

#[test]
fn test_detectLanguage_withSpanishProse_shouldDetectSpanish() {
    let sample = "El perro está en la casa y no quiere salir porque tiene mucho frío.";
    assert_eq!(detect_language(sample).code(), Some("spa_Latn"));
}

#[test]
fn test_detectLanguage_withFrenchProse_shouldDetectFrench() {
    let sample = "Le chat est dans la maison et il ne veut pas sortir avec nous.";
    assert_eq!(detect_language(sample).code(), Some("fra_Latn"));
}

#[test]
fn test_detectLanguage_withHangul_shouldDetectKorean() {
    let sample = "안녕하세요 저는 학생입니다 오늘 날씨가 정말 좋네요 감사합니다";
    assert_eq!(detect_language(sample).code(), Some("kor_Hang"));
}

#[test]
fn test_detectLanguage_withNoSignals_shouldReturnUnknown() {
    let report = LanguageClassifier::default().report("1234567890 1234567890 !!! ???");
    assert_eq!(report.detection, Detection::Unknown);
    assert!(report.tied.is_empty());
    assert!(report.scores.iter().all(|s| s.raw == 0));
}

#[test]
fn test_report_withShortSample_shouldHaveNoScores() {
    let report = LanguageClassifier::default().report("the and the");
    assert!(report.scores.is_empty());
    assert!(report.detection.is_unknown());
}

#[test]
fn test_normalize_shouldCollapseWhitespace() {
    assert_eq!(LanguageClassifier::normalize("  a \n\t b   c  "), "a b c");
}

#[test]
fn test_defaultSignatures_shouldCoverAllSupportedLanguages() {
    let classifier = LanguageClassifier::default();
    assert_eq!(classifier.signatures().len(), 18);
    for (code, _) in leengua::language_utils::SUPPORTED_LANGUAGES {
        assert!(
            classifier.signatures().iter().any(|s| s.code() == *code),
            "missing signature for {}",
            code
        );
    }
}

#[test]
fn test_commonWords_shouldMatchWholeWordsOnly() {
    let rule = DetectionRule::common_words(&["the"]).unwrap();
    assert_eq!(rule.kind(), RuleKind::CommonWord);
    assert_eq!(rule.weighted_matches("The other theme, the end"), 2);
}

#[test]
fn test_customClassifier_withBelowThresholdScore_shouldReturnUnknown() {
    let classifier = LanguageClassifier::with_signatures(vec![LanguageSignature::new(
        "xxx_Test",
        vec![DetectionRule::common_words(&["zz"]).unwrap()],
    )]);
    // One word match in a long sample stays under the threshold
    let sample = format!("zz {}", "padding ".repeat(20));
    assert_eq!(classifier.classify(&sample), Detection::Unknown);
}
