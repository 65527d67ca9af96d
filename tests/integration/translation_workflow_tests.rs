/*!
 * Integration tests for the document translation workflow
 */

use leengua::app_config::DocumentConfig;
use leengua::document::PageRange;
use leengua::errors::JobError;
use leengua::providers::mock::MockTranslator;
use leengua::translation::{JobEvent, JobOutcome, TranslationCache, TranslationJob, TranslationOrchestrator};
use crate::common;

fn document_of(events: &[JobEvent]) -> &str {
    match events.last() {
        Some(JobEvent::Complete { document }) => document,
        other => panic!("expected Complete as last event, got {:?}", other),
    }
}

/// Test a failed sentence rendered inline without failing the job
#[tokio::test]
async fn test_translation_withOneFailingSentence_shouldCompleteWithErrorFragment() {
    let translator = MockTranslator::fail_on(&[1]);
    let job = TranslationJob::new("One. Two. Three.", "eng_Latn", "spa_Latn");
    let (outcome, events) = common::run_collecting(&TranslationOrchestrator::default(), &job, &translator).await;

    assert!(matches!(outcome, JobOutcome::Completed { processed: 3, total: 3, .. }));
    let document = document_of(&events);
    assert_eq!(common::count_pairs(document), 3);
    assert_eq!(document.matches("<p class=\"error\">").count(), 1);
    assert!(document.contains("<p class=\"error\">Error translating: API responded with error: 500"));
    assert!(document.contains("[TRANSLATED to spa_Latn] One."));
    assert!(document.contains("[TRANSLATED to spa_Latn] Three."));
    assert_eq!(translator.received_sentences(), vec!["One.", "Two.", "Three."]);
}

/// Test the shape and order of the event stream
#[tokio::test]
async fn test_translation_eventStream_shouldBeOrderedAndEndWithOneTerminal() {
    let translator = MockTranslator::working();
    let job = TranslationJob::new(common::SAMPLE_TEXT, "eng_Latn", "spa_Latn");
    let (_, events) = common::run_collecting(&TranslationOrchestrator::default(), &job, &translator).await;

    assert_eq!(events[0], JobEvent::Initiate { job_id: job.id });
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    assert!(events.last().unwrap().is_terminal());

    let processed: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            JobEvent::Progress { processed, total, .. } => {
                assert_eq!(*total, 3);
                Some(*processed)
            }
            _ => None,
        })
        .collect();
    assert_eq!(processed, vec![1, 2, 3]);
}

/// Test speculative partials between authoritative updates
#[tokio::test]
async fn test_translation_withStreamingTranslator_shouldEmitSpeculativeProgress() {
    let translator = MockTranslator::streaming();
    let job = TranslationJob::new("Hello there. Bye now.", "eng_Latn", "spa_Latn");
    let (outcome, events) = common::run_collecting(&TranslationOrchestrator::default(), &job, &translator).await;
    assert!(matches!(outcome, JobOutcome::Completed { .. }));

    let mut last_authoritative = 0;
    let mut authoritative_output = String::new();
    let mut speculative_seen = 0;
    for event in &events {
        if let JobEvent::Progress {
            output,
            processed,
            speculative,
            ..
        } = event
        {
            if *speculative {
                speculative_seen += 1;
                // A partial never advances the count and extends the committed output
                assert_eq!(*processed, last_authoritative);
                assert!(output.starts_with(&authoritative_output));
            } else {
                assert_eq!(*processed, last_authoritative + 1);
                last_authoritative = *processed;
                authoritative_output = output.clone();
            }
        }
    }

    // "[TRANSLATED to spa_Latn] Hello there." has five words, four partials each
    assert_eq!(speculative_seen, 8);
    assert_eq!(last_authoritative, 2);

    let document = document_of(&events);
    assert!(document.contains("<p class=\"translation\">[TRANSLATED to spa_Latn] Hello there.</p>"));
    assert!(!document.contains("<p class=\"translation\">[TRANSLATED to spa_Latn]</p>"));
}

/// Test HTML escaping of source and translation text
#[tokio::test]
async fn test_translation_withMarkupInSource_shouldEscapeEverything() {
    let translator = MockTranslator::working();
    let job = TranslationJob::new("Use <script>alert('x')</script> & see.", "eng_Latn", "spa_Latn");
    let (_, events) = common::run_collecting(&TranslationOrchestrator::default(), &job, &translator).await;

    let document = document_of(&events);
    assert!(!document.contains("<script>"));
    assert!(document.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt; &amp; see."));
}

/// Test phonetic lines when requested
#[tokio::test]
async fn test_translation_withPhonetics_shouldAddPhoneticLinePerSentence() {
    let translator = MockTranslator::working();
    let job = TranslationJob::new("The ship. The church.", "eng_Latn", "spa_Latn").with_phonetics(true);
    let (_, events) = common::run_collecting(&TranslationOrchestrator::default(), &job, &translator).await;

    let document = document_of(&events);
    assert_eq!(document.matches("<p class=\"phonetic\">").count(), 2);
    assert!(document.contains("<p class=\"phonetic\">θe ʃip.</p>"));
    assert!(document.contains("<p class=\"phonetic\">θe tʃurtʃ.</p>"));
}

/// Test the cover excerpt and its suppression for later pages
#[tokio::test]
async fn test_translation_cover_shouldOnlyAppearFromFirstPage() {
    let config = DocumentConfig {
        sentences_per_page: 2,
        ..DocumentConfig::default()
    };
    let orchestrator = TranslationOrchestrator::new(&config);
    let translator = MockTranslator::working();
    let text = "My Title\n\nOne. Two. Three. Four.";

    let job = TranslationJob::new(text, "eng_Latn", "spa_Latn");
    let (_, events) = common::run_collecting(&orchestrator, &job, &translator).await;
    assert!(document_of(&events).contains("<div class=\"cover-page\">My Title</div>"));

    let job = TranslationJob::new(text, "eng_Latn", "spa_Latn").with_page_range(Some(PageRange::new(2, 3).unwrap()));
    let (outcome, events) = common::run_collecting(&orchestrator, &job, &translator).await;
    let document = document_of(&events);
    assert!(!document.contains("cover-page\">"));
    // "My Title" + 4 sentences, pages of 2: pages 2-3 hold sentences 3..5
    assert!(matches!(outcome, JobOutcome::Completed { total: 3, .. }));
    assert!(document.contains("<p class=\"original\">Two.</p>"));
    assert!(!document.contains("<p class=\"original\">One.</p>"));
}

/// Test that disabling the cover removes it
#[tokio::test]
async fn test_translation_withKeepCoverDisabled_shouldOmitCover() {
    let config = DocumentConfig {
        keep_cover: false,
        ..DocumentConfig::default()
    };
    let translator = MockTranslator::working();
    let job = TranslationJob::new("Title\n\nBody.", "eng_Latn", "spa_Latn");
    let (_, events) = common::run_collecting(&TranslationOrchestrator::new(&config), &job, &translator).await;
    assert!(!document_of(&events).contains("cover-page\">"));
}

/// Test that every sentence failing still yields a document
#[tokio::test]
async fn test_translation_withFailingTranslator_shouldStillComplete() {
    let translator = MockTranslator::failing();
    let job = TranslationJob::new("A. B.", "eng_Latn", "spa_Latn");
    let (outcome, events) = common::run_collecting(&TranslationOrchestrator::default(), &job, &translator).await;

    assert!(matches!(outcome, JobOutcome::Completed { processed: 2, .. }));
    assert_eq!(document_of(&events).matches("sentence-pair failed").count(), 2);
}

/// Test that artifacts-only input reports no content
#[tokio::test]
async fn test_translation_withOnlyArtifacts_shouldFailWithNoContent() {
    let translator = MockTranslator::working();
    let job = TranslationJob::new("obj\nendobj\n/Type\n12 0 0", "eng_Latn", "spa_Latn");
    let (outcome, events) = common::run_collecting(&TranslationOrchestrator::default(), &job, &translator).await;

    assert_eq!(outcome, JobOutcome::Failed(JobError::NoTranslatableContent));
    assert!(matches!(events.last(), Some(JobEvent::Error { .. })));
    assert_eq!(translator.request_count(), 0);
}

/// Test that a shared cache carries over between jobs
#[tokio::test]
async fn test_translation_withSharedCache_shouldSkipKnownSentences() {
    let cache = TranslationCache::new(true);
    let orchestrator = TranslationOrchestrator::default().with_cache(cache.clone());
    let translator = MockTranslator::working();

    let job = TranslationJob::new("Same. Other.", "eng_Latn", "spa_Latn");
    common::run_collecting(&orchestrator, &job, &translator).await;
    let job = TranslationJob::new("Same. Other. New.", "eng_Latn", "spa_Latn");
    common::run_collecting(&orchestrator, &job, &translator).await;

    assert_eq!(translator.request_count(), 3);
    assert_eq!(cache.stats().hits, 2);
    assert_eq!(cache.len(), 3);

    // A different target language is a different entry
    let job = TranslationJob::new("Same.", "eng_Latn", "fra_Latn");
    common::run_collecting(&orchestrator, &job, &translator).await;
    assert_eq!(translator.request_count(), 4);
}
