/*!
 * Tests for segmentation, page ranges, phonetics and rendering
 */

use leengua::document::{
    DocumentRenderer, PageRange, PageRangeFilter, SentenceSegmenter, escape_html, simple_phonetics,
};
use leengua::errors::JobError;
use crate::common;

#[test]
fn test_segment_withMultilineText_shouldPreserveOrder() {
    let text = "First line without stop\nSecond sentence. Third one?\n\n  Fourth!  ";
    let sentences = SentenceSegmenter::segment(text);
    assert_eq!(
        sentences,
        vec!["First line without stop", "Second sentence.", "Third one?", "Fourth!"]
    );
}

#[test]
fn test_segment_withAbbreviation_shouldSplitAfterIt() {
    // Punctuation heuristic: abbreviations end a unit too
    let sentences = SentenceSegmenter::segment("Dr. Smith arrived.");
    assert_eq!(sentences, vec!["Dr.", "Smith arrived."]);
}

#[test]
fn test_segment_withWhitespaceOnly_shouldReturnEmpty() {
    assert!(SentenceSegmenter::segment(" \n\t \n").is_empty());
}

#[test]
fn test_segment_shouldNeverReturnBlankEntries() {
    let text = "A. \n\n B!  C?\n%%EOF\n";
    let sentences = SentenceSegmenter::segment(text);
    assert!(sentences.iter().all(|s| !s.trim().is_empty()));
    assert_eq!(sentences, vec!["A.", "B!", "C?"]);
}

#[test]
fn test_isArtifact_shouldRecognizeStructuralTokens() {
    assert!(SentenceSegmenter::is_artifact("obj"));
    assert!(SentenceSegmenter::is_artifact("/Font"));
    assert!(SentenceSegmenter::is_artifact("3 0 12"));
    assert!(SentenceSegmenter::is_artifact("%comment"));
    assert!(!SentenceSegmenter::is_artifact("Objects are fine."));
}

#[test]
fn test_pageRange_fromBounds_shouldFillMissingBounds() {
    assert_eq!(PageRange::from_bounds(None, None).unwrap(), None);
    assert_eq!(PageRange::from_bounds(Some(3), None).unwrap(), Some(PageRange::new(3, 3).unwrap()));
    assert_eq!(PageRange::from_bounds(None, Some(2)).unwrap(), Some(PageRange::new(1, 2).unwrap()));
    assert_eq!(
        PageRange::from_bounds(Some(0), Some(2)),
        Err(JobError::InvalidPageRange { start: 0, end: 2 })
    );
    assert_eq!(PageRange::new(2, 5).unwrap().to_string(), "2-5");
}

#[test]
fn test_pageRangeFilter_withSmallPages_shouldSliceBySentenceCount() {
    let sentences: Vec<String> = SentenceSegmenter::segment(&common::numbered_sentences(7));
    let filter = PageRangeFilter::new(3);
    let range = PageRange::new(2, 3).unwrap();

    let selected = filter.filter(&sentences, Some(&range));
    assert_eq!(selected.len(), 4);
    assert_eq!(selected[0], "Sentence number 4.");
    assert_eq!(selected[3], "Sentence number 7.");
    assert_eq!(filter.page_count(sentences.len()), 3);
}

#[test]
fn test_pageRangeFilter_withZeroPerPage_shouldUseOne() {
    assert_eq!(PageRangeFilter::new(0).sentences_per_page(), 1);
}

#[test]
fn test_simplePhonetics_shouldApplyAllDigraphs() {
    assert_eq!(simple_phonetics("She thinks church"), "ʃe θinks tʃurtʃ");
}

#[test]
fn test_escapeHtml_withPlainText_shouldBeUnchanged() {
    assert_eq!(escape_html("plain text 123"), "plain text 123");
    assert_eq!(escape_html("&amp;"), "&amp;amp;");
}

#[test]
fn test_renderFragment_withMarkupInInput_shouldEscapeBothSides() {
    let fragment = DocumentRenderer::default().render_fragment("<b>bold</b>", "<i>x</i> & y", None);
    assert!(!fragment.contains("<b>"));
    assert!(fragment.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(fragment.contains("&lt;i&gt;x&lt;/i&gt; &amp; y"));
}

#[test]
fn test_renderCover_shouldUseFirstParagraph() {
    let renderer = DocumentRenderer::new(500);
    let cover = renderer.render_cover("My <Title>\n\nBody text follows.").unwrap();
    assert_eq!(cover, "<div class=\"cover-page\">My &lt;Title&gt;</div>\n\n");
    assert!(renderer.render_cover("   \n\n  ").is_none());
}

#[test]
fn test_renderCover_withLeadingBlankLines_shouldUseFirstParagraph() {
    let renderer = DocumentRenderer::default();
    assert_eq!(renderer.cover_excerpt("\n\nMy Title\n\nBody one."), Some("My Title"));
    assert_eq!(
        renderer.render_cover("\r\n\r\nMy Title\r\n\r\nBody one.").unwrap(),
        "<div class=\"cover-page\">My Title</div>\n\n"
    );
}

#[test]
fn test_coverExcerpt_shouldRespectCharacterLimit() {
    let renderer = DocumentRenderer::new(4);
    assert_eq!(renderer.cover_excerpt("äöüßxyz"), Some("äöüß"));
}

#[test]
fn test_renderDocument_shouldWrapContentWithMetadata() {
    let renderer = DocumentRenderer::default();
    let fragment = renderer.render_fragment("Hallo.", "Hola.", None);
    let html = renderer.render_document(&fragment, "deu_Latn", "spa_Latn");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<div class=\"content\">"));
    assert!(html.contains(&fragment));
    assert!(html.contains("Translated from deu_Latn to spa_Latn"));
    assert!(html.ends_with("</html>"));
}
