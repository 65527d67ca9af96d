/*!
 * Placeholder phonetic transcription.
 *
 * Produces a rough pronunciation hint by substituting a few English digraphs
 * with IPA symbols. It is illustrative only and makes no accuracy claims.
 */

/// Digraph substitutions, applied in order
const DIGRAPHS: &[(&str, &str)] = &[("th", "θ"), ("ch", "tʃ"), ("sh", "ʃ")];

/// Lowercase the text and replace `th`, `ch` and `sh` with IPA symbols
pub fn simple_phonetics(text: &str) -> String {
    DIGRAPHS
        .iter()
        .fold(text.to_lowercase(), |acc, (from, to)| acc.replace(from, to))
}
