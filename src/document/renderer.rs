/*!
 * HTML rendering for bilingual documents.
 *
 * Every piece of user text is escaped before it is placed in markup. The
 * structure is stable so downstream tooling can select on class names:
 * `div.content`, `div.sentence-pair` with `p.original`, optional
 * `p.phonetic` and `p.translation`, `p.error`, `div.cover-page` and
 * `div.metadata`.
 */

/// Default cap for the cover fragment, in characters
pub const DEFAULT_COVER_MAX_CHARS: usize = 500;

const STYLESHEET: &str = r#"    body {
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      line-height: 1.6;
      max-width: 800px;
      margin: 0 auto;
      padding: 20px;
      color: #333;
    }
    .sentence-pair {
      margin-bottom: 20px;
      page-break-inside: avoid;
    }
    .original {
      color: #1a73e8;
      font-weight: 500;
      margin-bottom: 4px;
    }
    .phonetic {
      color: #9e9e9e;
      font-style: italic;
      margin: 4px 0;
      font-size: 0.9em;
    }
    .translation {
      color: #3c4043;
      margin-top: 4px;
      padding-left: 15px;
      border-left: 2px solid #dadce0;
    }
    .error {
      color: #d50000;
      font-style: italic;
    }
    .cover-page {
      margin-bottom: 30px;
      font-size: 1.1em;
    }
    .metadata {
      margin: 20px 0;
      font-size: 0.8em;
      color: #5f6368;
      border-top: 1px solid #dadce0;
      padding-top: 10px;
    }
    @media print {
      body {
        font-size: 12pt;
      }
      .sentence-pair {
        page-break-inside: avoid;
      }
    }
"#;

/// Escape `& < > " '` for safe inclusion in HTML text and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders fragments and complete documents
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    cover_max_chars: usize,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_COVER_MAX_CHARS)
    }
}

impl DocumentRenderer {
    pub fn new(cover_max_chars: usize) -> Self {
        Self { cover_max_chars }
    }

    /// One original/translation pair, with an optional phonetic line
    pub fn render_fragment(&self, original: &str, translation: &str, phonetic: Option<&str>) -> String {
        let mut fragment = format!(
            "<div class=\"sentence-pair\">\n    <p class=\"original\">{}</p>\n",
            escape_html(original)
        );

        if let Some(phonetic) = phonetic {
            fragment.push_str(&format!("    <p class=\"phonetic\">{}</p>\n", escape_html(phonetic)));
        }

        fragment.push_str(&format!(
            "    <p class=\"translation\">{}</p>\n</div>\n\n",
            escape_html(translation)
        ));
        fragment
    }

    /// Inline marker for a sentence that failed to translate
    pub fn render_error_fragment(&self, sentence: &str, message: &str) -> String {
        format!(
            "<div class=\"sentence-pair failed\">\n    <p class=\"original\">{}</p>\n    <p class=\"error\">Error translating: {}</p>\n</div>\n\n",
            escape_html(sentence),
            escape_html(message)
        )
    }

    /// Leading excerpt of the source used as a cover
    ///
    /// Leading blank lines are skipped. The excerpt ends at the first blank
    /// line or after `cover_max_chars` characters, whichever comes first.
    /// Returns `None` when the source is blank.
    pub fn cover_excerpt<'a>(&self, source: &'a str) -> Option<&'a str> {
        let source = source.trim_start();
        let paragraph_end = [source.find("\n\n"), source.find("\r\n\r\n")]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(source.len());

        let char_end = source
            .char_indices()
            .nth(self.cover_max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(source.len());

        let excerpt = source[..paragraph_end.min(char_end)].trim();
        (!excerpt.is_empty()).then_some(excerpt)
    }

    /// Cover fragment for the source, if it has a non-blank opening
    pub fn render_cover(&self, source: &str) -> Option<String> {
        self.cover_excerpt(source)
            .map(|excerpt| format!("<div class=\"cover-page\">{}</div>\n\n", escape_html(excerpt)))
    }

    /// Wrap accumulated fragments in a standalone styled HTML page
    pub fn render_document(&self, content: &str, source_language: &str, target_language: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <title>Translated Document</title>\n  <style>\n{}  </style>\n</head>\n<body>\n  <div class=\"content\">\n    {}\n  </div>\n  <div class=\"metadata\">\n    <p>Translated from {} to {} with Leengua</p>\n  </div>\n</body>\n</html>",
            STYLESHEET,
            content,
            escape_html(source_language),
            escape_html(target_language)
        )
    }
}
